//! Public formatting entry points
//!
//! [`Formatter`] renders one or many values with a shared [`RenderOptions`]:
//!
//! - [`Formatter::render`]: bare values, `v` or `[v1, v2, ...]` on one line,
//!   followed by each value's connector diagram aligned under it
//! - [`Formatter::format`]: labeled values, one `label = value` line each,
//!   every line followed by its own diagram
//! - [`Formatter::format_flat`]: the labeled form from a flat
//!   `label, value, label, value, ...` argument list
//!
//! Every value gets a fresh [`Introspector`], so aliasing between two
//! separate top-level values is never reported.

pub mod options;
pub mod pretty;

pub use options::RenderOptions;

use crate::error::{DebugError, Result};
use crate::render::constants::{HEADER_PADDING, SEPARATOR};
use crate::render::{Introspector, RenderedValue};
use crate::value::Inspect;
use unicode_width::UnicodeWidthStr;

/// Text between a label and its value
pub const LABEL_SEPARATOR: &str = " = ";

/// One item of a flat label/value argument list
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    Label(&'a str),
    Value(&'a dyn Inspect),
}

impl<'a> Arg<'a> {
    pub fn value<T: Inspect>(value: &'a T) -> Self {
        Arg::Value(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(label: &'a str) -> Self {
        Arg::Label(label)
    }
}

/// Renders values with fixed options
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    options: RenderOptions,
}

impl Formatter {
    pub fn new(options: RenderOptions) -> Self {
        Formatter { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render one top-level value with a fresh registry
    pub fn render_value(&self, value: &dyn Inspect) -> RenderedValue {
        let mut introspector = Introspector::new(&self.options);
        introspector.render(value);
        introspector.finish()
    }

    /// Render bare values starting at column 0
    pub fn render(&self, values: &[&dyn Inspect]) -> String {
        self.render_at(0, values)
    }

    /// Render bare values whose line is prefixed by `header_width` columns
    ///
    /// The header itself is not written; it only shifts the diagram.
    pub fn render_at(&self, header_width: usize, values: &[&dyn Inspect]) -> String {
        let bracketed = values.len() > 1;
        let mut line = String::new();
        let mut diagrams = String::new();
        let mut column = header_width;

        if bracketed {
            line.push('[');
            column += 1;
        }

        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                line.push_str(SEPARATOR);
                column += SEPARATOR.width();
            }

            let rendered = self.render_value(*value);
            if self.draws_diagram() {
                if let Some(diagram) = rendered.diagram(column) {
                    diagrams.push_str(&diagram.render(self.options.glyphs));
                }
            }
            column += rendered.width();
            line.push_str(&self.layout(&rendered));
        }

        if bracketed {
            line.push(']');
        }

        if diagrams.is_empty() {
            line
        } else {
            line.push('\n');
            line.push_str(&diagrams);
            line
        }
    }

    /// Render labeled values, one line per pair
    pub fn format(&self, pairs: &[(&str, &dyn Inspect)]) -> String {
        let mut out = String::new();

        for (i, (label, value)) in pairs.iter().enumerate() {
            let rendered = self.render_value(*value);
            let header_width = label.width() + HEADER_PADDING;

            out.push_str(label);
            out.push_str(LABEL_SEPARATOR);
            out.push_str(&self.layout(&rendered));
            if i + 1 < pairs.len() {
                out.push_str(SEPARATOR);
            }
            out.push('\n');

            if self.draws_diagram() {
                if let Some(diagram) = rendered.diagram(header_width) {
                    out.push_str(&diagram.render(self.options.glyphs));
                }
            }
        }

        out
    }

    /// Render a flat `label, value, ...` list
    ///
    /// Fails on an odd-length list or a label/value out of place, without
    /// rendering anything.
    pub fn format_flat(&self, args: &[Arg<'_>]) -> Result<String> {
        let pairs = pair_up(args)?;
        Ok(self.format(&pairs))
    }

    fn draws_diagram(&self) -> bool {
        self.options.print_pointers && !self.options.pretty
    }

    fn layout(&self, rendered: &RenderedValue) -> String {
        if self.options.pretty {
            pretty::reflow(&rendered.text)
        } else {
            rendered.text.clone()
        }
    }
}

fn pair_up<'a>(args: &[Arg<'a>]) -> Result<Vec<(&'a str, &'a dyn Inspect)>> {
    let mut pairs = Vec::with_capacity(args.len() / 2);

    for (n, chunk) in args.chunks(2).enumerate() {
        let label = match chunk[0] {
            Arg::Label(label) => label,
            Arg::Value(_) => return Err(DebugError::ExpectedLabel { index: n * 2 }),
        };

        match chunk.get(1) {
            Some(Arg::Value(value)) => pairs.push((label, *value)),
            Some(Arg::Label(other)) => {
                return Err(DebugError::ExpectedValue {
                    index: n * 2 + 1,
                    label: other.to_string(),
                })
            }
            None => {
                return Err(DebugError::MissingValue {
                    label: label.to_string(),
                    count: args.len(),
                })
            }
        }
    }

    Ok(pairs)
}

/// Render bare values with default options
pub fn render(print_pointers: bool, values: &[&dyn Inspect]) -> String {
    Formatter::new(RenderOptions::default().with_print_pointers(print_pointers)).render(values)
}

/// Render labeled values with default options
pub fn format(pairs: &[(&str, &dyn Inspect)]) -> String {
    Formatter::default().format(pairs)
}

/// Render a flat label/value list with default options
pub fn format_flat(args: &[Arg<'_>]) -> Result<String> {
    Formatter::default().format_flat(args)
}

/// Render bare values: `render!(print_pointers, a, b, ...)`
#[macro_export]
macro_rules! render {
    ($print_pointers:expr, $($value:expr),+ $(,)?) => {
        $crate::facade::render(
            $print_pointers,
            &[$(&$value as &dyn $crate::value::Inspect),+],
        )
    };
}

/// Render labeled values: `dbg_format!("a", a, "b", b)`
///
/// An odd number of arguments does not compile.
#[macro_export]
macro_rules! dbg_format {
    ($($label:expr, $value:expr),+ $(,)?) => {
        $crate::facade::format(&[$(($label, &$value as &dyn $crate::value::Inspect)),+])
    };
}
