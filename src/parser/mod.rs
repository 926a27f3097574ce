//! JSONL parser for question log repositories.
//!
//! Pure parsing functions converting JSONL lines into validated
//! [`LogEntry`] values. Decoding failures are per line and never abort a load.

use crate::model::{Author, AuthorId, EntryId, EntryStatus, LogEntry, MalformedEntry, ParseError};
use chrono::{DateTime, Local, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::warn;

/// Raw JSON structure for deserializing log entries.
///
/// The author may be nested (`"author": {"id", "email"}`) or flat
/// (`"authorId"`, `"authorEmail"`); nested wins when both are present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLogEntry {
    id: Option<String>,
    author: Option<RawAuthor>,
    author_id: Option<String>,
    author_email: Option<String>,
    #[serde(alias = "questionText")]
    question: Option<String>,
    #[serde(alias = "responseText")]
    answer: Option<String>,
    #[serde(alias = "timestampIso")]
    timestamp: Option<String>,
    response_time_ms: Option<u64>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    id: Option<String>,
    email: Option<String>,
}

/// Outcome of parsing a single line without failing.
#[derive(Debug, Clone)]
pub enum ParseResult {
    /// The line decoded into a valid entry.
    Valid(Box<LogEntry>),
    /// The line was rejected; the raw text and error are kept.
    Malformed(MalformedEntry),
}

/// Entries decoded from a JSONL document, plus the lines that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedRepository {
    /// Valid entries in file order, ids unique.
    pub entries: Vec<LogEntry>,
    /// Rejected lines in file order.
    pub malformed: Vec<MalformedEntry>,
}

/// Parse one JSONL line.
///
/// # Errors
///
/// Returns a [`ParseError`] naming `line_number` when the JSON is invalid, a
/// required field is missing, or a value fails validation.
pub fn parse_entry(raw: &str, line_number: usize) -> Result<LogEntry, ParseError> {
    let raw_entry: RawLogEntry =
        serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
            line: line_number,
            message: e.to_string(),
        })?;

    let missing = |field: &'static str| ParseError::MissingField {
        line: line_number,
        field,
    };

    let id = raw_entry.id.ok_or_else(|| missing("id"))?;
    let id = EntryId::new(id).map_err(|_| ParseError::EmptyId {
        line: line_number,
        field: "id",
    })?;

    let (author_id, author_email) = match raw_entry.author {
        Some(author) => (author.id, author.email),
        None => (raw_entry.author_id, raw_entry.author_email),
    };
    let author_id = author_id.ok_or_else(|| missing("author.id"))?;
    let author_id = AuthorId::new(author_id).map_err(|_| ParseError::EmptyId {
        line: line_number,
        field: "author.id",
    })?;
    let author_email = author_email.ok_or_else(|| missing("author.email"))?;

    let question = raw_entry.question.ok_or_else(|| missing("question"))?;
    let answer = raw_entry.answer.unwrap_or_default();

    let raw_timestamp = raw_entry.timestamp.ok_or_else(|| missing("timestamp"))?;
    let timestamp = parse_timestamp(&raw_timestamp).ok_or(ParseError::InvalidTimestamp {
        line: line_number,
        raw: raw_timestamp,
    })?;

    let response_time_ms = raw_entry
        .response_time_ms
        .ok_or_else(|| missing("responseTimeMs"))?;

    let raw_status = raw_entry.status.ok_or_else(|| missing("status"))?;
    let status: EntryStatus = raw_status.parse().map_err(|_| ParseError::InvalidStatus {
        line: line_number,
        raw: raw_status,
    })?;

    Ok(LogEntry::new(
        id,
        Author::new(author_id, author_email),
        question,
        answer,
        timestamp,
        response_time_ms,
        status,
    ))
}

/// Parse one line, turning failures into a [`MalformedEntry`].
pub fn parse_entry_graceful(raw: &str, line_number: usize) -> ParseResult {
    match parse_entry(raw, line_number) {
        Ok(entry) => ParseResult::Valid(Box::new(entry)),
        Err(error) => ParseResult::Malformed(MalformedEntry::new(raw, error)),
    }
}

/// Parse a whole JSONL document. Blank lines are skipped silently.
///
/// The first line carrying a given id wins; later lines with the same id
/// are recorded as [`ParseError::DuplicateId`].
pub fn parse_repository(content: &str) -> ParsedRepository {
    let mut repository = ParsedRepository::default();
    let mut seen: HashSet<EntryId> = HashSet::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let result = match parse_entry_graceful(line, index + 1) {
            ParseResult::Valid(entry) if !seen.insert(entry.id().clone()) => {
                ParseResult::Malformed(MalformedEntry::new(
                    line,
                    ParseError::DuplicateId {
                        line: index + 1,
                        id: entry.id().as_str().to_string(),
                    },
                ))
            }
            other => other,
        };
        match result {
            ParseResult::Valid(entry) => repository.entries.push(*entry),
            ParseResult::Malformed(malformed) => {
                warn!(
                    line = malformed.line_number(),
                    error = %malformed.error(),
                    "skipping malformed log entry"
                );
                repository.malformed.push(malformed);
            }
        }
    }

    repository
}

/// Parse a naive ISO-8601 date-time, or an RFC 3339 instant converted to local time.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>().ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|instant| instant.with_timezone(&Local).naive_local())
    })
}
