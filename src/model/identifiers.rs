//! Identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.

use serde::Serialize;
use std::fmt;

/// Unique identifier of a log entry within a repository.
///
/// Ordered lexicographically; the query engine relies on this ordering to
/// break ties between entries with identical timestamps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidEntryId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidEntryId::Empty)
        } else {
            Ok(Self(raw))
        }
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the author who asked the question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AuthorId(String);

impl AuthorId {
    /// Smart constructor: validates non-empty author id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidAuthorId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidAuthorId::Empty)
        } else {
            Ok(Self(raw))
        }
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== Error Types =====

/// Rejected entry id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEntryId {
    /// The id was the empty string.
    #[error("Entry ID cannot be empty")]
    Empty,
}

/// Rejected author id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAuthorId {
    /// The id was the empty string.
    #[error("Author ID cannot be empty")]
    Empty,
}

// ===== Tests =====
