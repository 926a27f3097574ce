//! Log entry types representing one recorded question/answer interaction.
//!
//! LogEntry is immutable once created. The query engine only filters and
//! reorders references to entries; it never mutates them.

use crate::model::{AuthorId, EntryId};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ===== EntryStatus =====

/// Outcome of an interaction - exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryStatus {
    /// The answer was delivered.
    Completed,
    /// The answer is still being produced.
    Pending,
    /// Producing the answer failed.
    Failed,
}

impl EntryStatus {
    /// Canonical spelling used in the JSONL repository.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Completed => "Completed",
            EntryStatus::Pending => "Pending",
            EntryStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown entry status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for EntryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Completed" => Ok(EntryStatus::Completed),
            "Pending" => Ok(EntryStatus::Pending),
            "Failed" => Ok(EntryStatus::Failed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

// ===== Author =====

/// The person who asked the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    id: AuthorId,
    email: String,
}

impl Author {
    /// Create an author.
    pub fn new(id: AuthorId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    /// Author identifier.
    pub fn id(&self) -> &AuthorId {
        &self.id
    }

    /// Author email address.
    pub fn email(&self) -> &str {
        &self.email
    }
}

// ===== LogEntry =====

/// One recorded interaction.
/// Invariant: All fields validated at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    id: EntryId,
    author: Author,
    question_text: String,
    response_text: String,
    /// Local wall-clock time without an offset.
    timestamp: NaiveDateTime,
    response_time_ms: u64,
    status: EntryStatus,
}

impl LogEntry {
    /// Create a new log entry.
    ///
    /// Intended for the JSONL parser and for tests; entries from a file
    /// should come through [`crate::parser::parse_entry`].
    pub fn new(
        id: EntryId,
        author: Author,
        question_text: impl Into<String>,
        response_text: impl Into<String>,
        timestamp: NaiveDateTime,
        response_time_ms: u64,
        status: EntryStatus,
    ) -> Self {
        Self {
            id,
            author,
            question_text: question_text.into(),
            response_text: response_text.into(),
            timestamp,
            response_time_ms,
            status,
        }
    }

    // ===== Accessors (read-only) =====

    /// Unique id within the repository.
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Who asked the question.
    pub fn author(&self) -> &Author {
        &self.author
    }

    /// Full question text.
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    /// Full answer text; empty while pending.
    pub fn response_text(&self) -> &str {
        &self.response_text
    }

    /// Local wall-clock time the question was asked.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Response time in milliseconds.
    pub fn response_time_ms(&self) -> u64 {
        self.response_time_ms
    }

    /// Processing status.
    pub fn status(&self) -> EntryStatus {
        self.status
    }

    /// Returns true if the interaction completed successfully.
    pub fn is_completed(&self) -> bool {
        self.status == EntryStatus::Completed
    }
}

// ===== Tests =====
