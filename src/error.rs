//! Error types for the debugging facade
//!
//! Data never fails to render: unsupported shapes degrade to inline markers.
//! The only errors are malformed calls and terminal I/O while paused.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DebugError {
    /// Flat label/value list ended on a label
    #[error("label '{label}' has no value (argument count {count} is odd)")]
    MissingValue { label: String, count: usize },

    /// A value sits where a label was expected
    #[error("argument {index} must be a text label")]
    ExpectedLabel { index: usize },

    /// A label sits where a value was expected
    #[error("argument {index} must be a value, got label '{label}'")]
    ExpectedValue { index: usize, label: String },

    /// Reading operator input or driving the terminal failed
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DebugError>;
