//! Call-site frames and stack capture

use std::backtrace::Backtrace;
use std::fmt;

/// Printed when a frame has no resolvable source location
const UNKNOWN: &str = "???";

/// One call-stack entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub function: String,
    pub file: String,
    pub line: u32,
}

impl Frame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Frame {
            function: function.into(),
            file: file.into(),
            line,
        }
    }

    /// Frame for the function enclosing a `here!()` marker
    ///
    /// `marker` is the type name of the marker fn, e.g.
    /// `my_crate::module::function::{{closure}}::__here`. The crate prefix,
    /// closure segments and marker name are dropped.
    pub fn from_marker(marker: &str, file: &str, line: u32) -> Self {
        let path = marker.strip_suffix("::__here").unwrap_or(marker);
        let segments: Vec<&str> = path
            .split("::")
            .filter(|segment| *segment != "{{closure}}")
            .collect();
        let function = match segments.as_slice() {
            [single] => single.to_string(),
            [_crate_name, rest @ ..] => rest.join("::"),
            [] => UNKNOWN.to_string(),
        };
        Frame::new(function, file, line)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}() [{}:{}]", self.function, self.file, self.line)
    }
}

/// Capture the frame of the calling function
#[macro_export]
macro_rules! here {
    () => {{
        fn __here() {}
        fn __name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::debug::Frame::from_marker(__name_of(__here), file!(), line!())
    }};
}

/// Producer of the current call stack
pub trait StackSource {
    /// Frames from the caller outward, after dropping `skip` of them
    fn frames(&self, skip: usize) -> Vec<Frame>;
}

/// Stack source backed by `std::backtrace`
///
/// Frames of the capture machinery and of this module's own debugging
/// helpers are dropped before `skip` is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceStack;

impl StackSource for BacktraceStack {
    fn frames(&self, skip: usize) -> Vec<Frame> {
        let captured = Backtrace::force_capture();
        parse_backtrace(&captured.to_string())
            .into_iter()
            .skip_while(|frame| is_internal(&frame.function))
            .skip(skip)
            .collect()
    }
}

fn is_internal(function: &str) -> bool {
    let own = concat!(env!("CARGO_CRATE_NAME"), "::debug::");
    let function = function.trim_start_matches('<');
    function.starts_with("std::backtrace") || function.starts_with(own)
}

/// Parse the text form of a `std::backtrace::Backtrace`
///
/// ```text
///    0: my_crate::main
///              at ./src/main.rs:4:5
/// ```
pub fn parse_backtrace(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();

    for line in text.lines().map(str::trim) {
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                let mut parts = location.rsplitn(3, ':');
                let _column = parts.next();
                let line = parts.next().and_then(|l| l.parse().ok());
                match (line, parts.next()) {
                    (Some(line), Some(file)) => {
                        frame.file = file.to_string();
                        frame.line = line;
                    }
                    _ => frame.file = location.to_string(),
                }
            }
            continue;
        }

        let Some((index, symbol)) = line.split_once(": ") else {
            continue;
        };
        if index.chars().all(|c| c.is_ascii_digit()) && !index.is_empty() {
            frames.push(Frame::new(strip_hash(symbol), UNKNOWN, 0));
        }
    }

    frames
}

/// Drop a trailing `::h0123456789abcdef` symbol hash
fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::") {
        Some((path, hash))
            if hash.len() == 17
                && hash.starts_with('h')
                && hash[1..].chars().all(|c| c.is_ascii_hexdigit()) =>
        {
            path
        }
        _ => symbol,
    }
}

/// One `at func() [file:line]` line per frame
pub fn format_stack(frames: &[Frame]) -> String {
    frames.iter().map(|frame| format!("{}\n", frame)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "   0: std::backtrace_rs::backtrace::libunwind::trace
             at /rustc/abc/library/std/src/../../backtrace/src/backtrace/libunwind.rs:116:5
   1: std::backtrace::Backtrace::create
             at /rustc/abc/library/std/src/backtrace.rs:331:13
   2: demo::worker::step::h0123456789abcdef
             at ./src/worker.rs:42:9
   3: demo::main
   4: __libc_start_main
";

    #[test]
    fn test_parse_backtrace() {
        let frames = parse_backtrace(SAMPLE);
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[2], Frame::new("demo::worker::step", "./src/worker.rs", 42));
        assert_eq!(frames[3], Frame::new("demo::main", "???", 0));
    }

    #[test]
    fn test_internal_frames_skipped() {
        let kept: Vec<Frame> = parse_backtrace(SAMPLE)
            .into_iter()
            .skip_while(|frame| is_internal(&frame.function))
            .collect();
        assert_eq!(kept[0].function, "demo::worker::step");
    }

    #[test]
    fn test_frame_display() {
        let frame = Frame::new("worker::step", "src/worker.rs", 42);
        assert_eq!(frame.to_string(), "at worker::step() [src/worker.rs:42]");
        assert_eq!(
            format_stack(&[frame.clone(), frame]),
            "at worker::step() [src/worker.rs:42]\nat worker::step() [src/worker.rs:42]\n"
        );
    }

    #[test]
    fn test_from_marker() {
        let frame = Frame::from_marker("dbgview::debug::tests::run::{{closure}}::__here", "x.rs", 3);
        assert_eq!(frame.function, "debug::tests::run");
    }

    #[test]
    fn test_here_names_enclosing_function() {
        let frame = crate::here!();
        assert_eq!(frame.function, "debug::location::tests::test_here_names_enclosing_function");
        assert!(frame.file.ends_with("location.rs"));
        assert!(frame.line > 0);
    }
}
