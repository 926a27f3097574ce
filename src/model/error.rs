//! Error types for the qlog shell.
//!
//! This module defines a hierarchical error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the `qlog` binary
//!   - [`InputError`] - Repository file/stdin reading failures
//!   - [`ParseError`] - JSONL decoding failures for a single line
//!   - [`ConfigError`] - Config file read/parse failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!
//! # Error Recovery Strategy
//!
//! The core (query engine, date-range selector, presets) has no error paths at all: invalid
//! date text leaves the committed range unchanged, out-of-range pages are clamped and an
//! empty repository yields zero metrics. Errors here belong to the impure shell.
//!
//! Parse errors are **non-fatal**: a malformed line is logged and skipped so the remaining
//! entries stay browsable. Input, config and output errors are fatal.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes of the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the repository from file or stdin. Fatal.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Failed to decode a log entry.
    ///
    /// Only surfaces here when a caller chooses strict loading; the default loader
    /// records the failure and continues.
    #[error("Failed to parse log entry: {0}")]
    Parse(#[from] ParseError),

    /// Config file exists but could not be read or parsed. Fatal.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed. Fatal.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    /// Writing the result to stdout failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// No entry carries the id asked for by the detail view.
    #[error("Question not found: {id}")]
    EntryNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// Encoding the result as JSON failed.
    #[error("Failed to encode result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors encountered when reading the repository from files or stdin.
///
/// # Recovery Patterns
///
/// - **FileNotFound**: Display error and exit (user provided invalid path)
/// - **NoInput**: Display usage help - user must provide a file path or pipe stdin
/// - **Io**: Generic I/O failures (permissions, disk errors) - display and exit
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified repository file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use qlog::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No file path was given and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when decoding one JSONL line into a [`crate::model::LogEntry`].
///
/// All variants carry the 1-based `line` so users can locate the offending record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line is not syntactically valid JSON, or a field has the wrong JSON type.
    ///
    /// # Examples
    ///
    /// ```
    /// use qlog::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 42,
    ///     message: "expected value at line 1 column 1".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number.
        line: usize,
        /// `serde_json` error message.
        message: String,
    },

    /// A required field is absent.
    #[error("Missing required field '{field}' at line {line}")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// JSON key that was expected.
        field: &'static str,
    },

    /// The timestamp is neither a naive ISO-8601 date-time nor RFC 3339.
    #[error("Invalid timestamp '{raw}' at line {line}")]
    InvalidTimestamp {
        /// 1-based line number.
        line: usize,
        /// The raw value as found in the file.
        raw: String,
    },

    /// The status is not one of `Completed`, `Pending`, `Failed`.
    #[error("Invalid status '{raw}' at line {line}")]
    InvalidStatus {
        /// 1-based line number.
        line: usize,
        /// The raw value as found in the file.
        raw: String,
    },

    /// The entry id or author id is the empty string.
    #[error("Empty identifier '{field}' at line {line}")]
    EmptyId {
        /// 1-based line number.
        line: usize,
        /// Which identifier was empty.
        field: &'static str,
    },

    /// The entry id was already used by an earlier line.
    #[error("Duplicate entry id '{id}' at line {line}")]
    DuplicateId {
        /// 1-based line number of the repeated id.
        line: usize,
        /// The repeated id.
        id: String,
    },
}

impl ParseError {
    /// 1-based line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidJson { line, .. }
            | ParseError::MissingField { line, .. }
            | ParseError::InvalidTimestamp { line, .. }
            | ParseError::InvalidStatus { line, .. }
            | ParseError::EmptyId { line, .. }
            | ParseError::DuplicateId { line, .. } => *line,
        }
    }
}
