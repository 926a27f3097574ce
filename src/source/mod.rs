//! Repository input sources.
//!
//! The question log is read once, either from a JSONL file or from piped
//! stdin, and parsed at the boundary into a [`ParsedRepository`].

use crate::model::error::InputError;
use crate::parser::{parse_repository, ParsedRepository};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the repository is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read-once JSONL file.
    File(PathBuf),
    /// Piped stdin, read to EOF.
    Stdin,
}

impl InputSource {
    /// Choose a file when one was given, stdin otherwise.
    pub fn detect(file: Option<PathBuf>) -> Self {
        match file {
            Some(path) => InputSource::File(path),
            None => InputSource::Stdin,
        }
    }

    /// Read and parse the whole repository.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist,
    /// `InputError::NoInput` if stdin is an interactive terminal, and
    /// `InputError::Io` for other read failures.
    pub fn load(&self) -> Result<ParsedRepository, InputError> {
        match self {
            InputSource::File(path) => load_file(path),
            InputSource::Stdin => {
                let stdin = std::io::stdin();
                if stdin.is_terminal() {
                    return Err(InputError::NoInput);
                }
                load_reader(stdin.lock())
            }
        }
    }
}

/// Read and parse a JSONL file.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` when `path` does not exist.
pub fn load_file(path: &Path) -> Result<ParsedRepository, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let repository = parse_repository(&content);
    info!(
        path = %path.display(),
        entries = repository.entries.len(),
        malformed = repository.malformed.len(),
        "loaded question log"
    );
    Ok(repository)
}

/// Read any reader to EOF and parse it as JSONL.
///
/// # Errors
///
/// Returns `InputError::Io` if reading fails or the data is not UTF-8.
pub fn load_reader(mut reader: impl Read) -> Result<ParsedRepository, InputError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let repository = parse_repository(&content);
    info!(
        entries = repository.entries.len(),
        malformed = repository.malformed.len(),
        "loaded question log from stream"
    );
    Ok(repository)
}
