//! Breakpoint-style variable dumps
//!
//! [`Report`] prefixes the labeled rendering of some variables with the
//! calling location and hands the finished text to the log sink (a
//! `tracing` event on the `dbgview` target). It returns a [`Breaker`] that
//! can then pause the program:
//!
//! ```no_run
//! let total = 42;
//! let names = vec!["a", "b"];
//! dbgview::display!("total", total, "names", names).brk(total > 40)?;
//! # Ok::<(), dbgview::DebugError>(())
//! ```
//!
//! Output layout:
//!
//! ```text
//! [Debug] at module::function() [src/file.rs:12]
//!
//! [Variables]
//! total = 42, 
//! names = &str["a", "b"]
//! ```

pub mod location;
pub mod pause;

pub use location::{format_stack, parse_backtrace, BacktraceStack, Frame, StackSource};
pub use pause::{KeyPause, NoPause, Pause, StdinPause};

use crate::error::Result;
use crate::facade::{Formatter, RenderOptions};
use crate::ui::viewer::ViewerPause;
use crate::value::Inspect;
use std::io::{self, Write};

/// Target of the log events carrying reports
pub const LOG_TARGET: &str = "dbgview";

const CONTINUE_PROMPT: &str = "press ENTER to continue";

fn location_header(frame: &Frame) -> String {
    format!(
        "[Debug] at {}() [{}:{}]\n",
        frame.function, frame.file, frame.line
    )
}

/// Labeled variables captured at one call site
pub struct Report<'a> {
    frame: Frame,
    formatter: Formatter,
    variables: Vec<(&'a str, &'a dyn Inspect)>,
}

impl<'a> Report<'a> {
    /// Empty report for `frame`, with options from the environment
    pub fn new(frame: Frame) -> Self {
        Report {
            frame,
            formatter: Formatter::new(RenderOptions::from_env()),
            variables: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.formatter = Formatter::new(options);
        self
    }

    pub fn variable<T: Inspect>(mut self, label: &'a str, value: &'a T) -> Self {
        self.variables.push((label, value));
        self
    }

    pub fn text(&self) -> String {
        let mut text = location_header(&self.frame);
        text.push_str("\n[Variables]\n");
        text.push_str(&self.formatter.format(&self.variables));
        text
    }

    /// Log the report and return a handle for pausing
    pub fn emit(self) -> Breaker {
        let text = self.text();
        tracing::info!(target: LOG_TARGET, "{}", text);
        Breaker { report: text }
    }
}

/// Handle returned by an emitted [`Report`]
#[derive(Debug, Clone)]
pub struct Breaker {
    report: String,
}

impl Breaker {
    pub fn report(&self) -> &str {
        &self.report
    }

    /// When `condition` holds, print the stack and wait for a line on stdin
    pub fn brk(&self, condition: bool) -> Result<()> {
        self.brk_with(condition, &mut io::stderr(), &BacktraceStack, &StdinPause)
    }

    /// [`brk`](Self::brk) with explicit output, stack source and pause
    pub fn brk_with(
        &self,
        condition: bool,
        out: &mut dyn Write,
        stack: &dyn StackSource,
        pause: &dyn Pause,
    ) -> Result<()> {
        if !condition {
            return Ok(());
        }

        write!(out, "\n[Stack]\n{}", format_stack(&stack.frames(0)))?;
        write!(out, "\n{}", CONTINUE_PROMPT)?;
        out.flush()?;
        pause.wait_for_continue()?;
        Ok(())
    }

    /// When `condition` holds, show the report and stack in the terminal viewer
    pub fn view(&self, condition: bool) -> Result<()> {
        if !condition {
            return Ok(());
        }

        let text = format!(
            "{}\n[Stack]\n{}",
            self.report,
            format_stack(&BacktraceStack.frames(0))
        );
        ViewerPause::new(text).wait_for_continue()?;
        Ok(())
    }
}

/// Log the calling location and stack, then wait for the operator
pub fn pause_at(frame: &Frame, stack: &dyn StackSource, pause: &dyn Pause) -> Result<()> {
    let text = format!(
        "{}\n[Stack]\n{}\n{}",
        location_header(frame),
        format_stack(&stack.frames(0)),
        CONTINUE_PROMPT
    );
    tracing::info!(target: LOG_TARGET, "{}", text);
    pause.wait_for_continue()?;
    Ok(())
}

/// Dump labeled variables at the call site: `display!("a", a, "b", b)`
#[macro_export]
macro_rules! display {
    ($($label:expr, $value:expr),+ $(,)?) => {
        $crate::debug::Report::new($crate::here!())
            $(.variable($label, &$value))+
            .emit()
    };
}

/// [`display!`] with the pretty multi-line layout
#[macro_export]
macro_rules! display_pretty {
    ($($label:expr, $value:expr),+ $(,)?) => {
        $crate::debug::Report::new($crate::here!())
            .with_options($crate::facade::RenderOptions::from_env().with_pretty(true))
            $(.variable($label, &$value))+
            .emit()
    };
}

/// Log the call site and stack, then wait for Enter on stdin
#[macro_export]
macro_rules! breakpoint {
    () => {
        $crate::debug::pause_at(
            &$crate::here!(),
            &$crate::debug::BacktraceStack,
            &$crate::debug::StdinPause,
        )
    };
}
