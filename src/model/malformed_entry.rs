//! Record of a JSONL line that could not be decoded.
//!
//! Malformed lines are kept alongside the valid entries so the shell can
//! report them without aborting the load.

use crate::model::ParseError;

/// A JSONL line that could not be parsed into a [`crate::model::LogEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntry {
    raw_line: String,
    error: ParseError,
}

impl MalformedEntry {
    /// Create a malformed entry from the raw line and the decoding error.
    pub fn new(raw_line: impl Into<String>, error: ParseError) -> Self {
        Self {
            raw_line: raw_line.into(),
            error,
        }
    }

    /// 1-based line number in the JSONL input.
    pub fn line_number(&self) -> usize {
        self.error.line()
    }

    /// The raw line content.
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// Why the line was rejected.
    pub fn error(&self) -> &ParseError {
        &self.error
    }
}
