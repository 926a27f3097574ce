//! Display formatting for dates, ranges and table cells.
//!
//! These helpers only shape text for output. The values they format are
//! never altered.

use super::constants::{ELLIPSIS, SLOW_MARKER};
use crate::model::DateRange;
use chrono::{NaiveDate, NaiveDateTime};
use std::borrow::Cow;

/// Human label for the date-range button.
///
/// - both bounds unset: "All Time"
/// - only a start: "Mar 5"
/// - both on one day: "Mar 5, 2024"
/// - two days: "Mar 1 - Mar 7, 2024"
/// - only an end: "Until Mar 7, 2024"
pub fn range_label(range: &DateRange) -> String {
    match (range.start_date(), range.end_date()) {
        (None, None) => "All Time".to_string(),
        (Some(start), None) => start.format("%b %-d").to_string(),
        (Some(start), Some(end)) if start == end => start.format("%b %-d, %Y").to_string(),
        (Some(start), Some(end)) => {
            format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
        }
        (None, Some(end)) => format!("Until {}", end.format("%b %-d, %Y")),
    }
}

/// Calendar navigation label, e.g. "October 2026".
pub fn month_label(month: NaiveDate) -> String {
    month.format("%B %Y").to_string()
}

/// Table timestamp, e.g. "Mar 5, 2024, 3:45 PM".
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Cut `text` to `max_chars` characters, marking the cut with "…".
///
/// Line breaks are flattened to spaces so a row stays on one line.
pub fn truncate(text: &str, max_chars: usize) -> Cow<'_, str> {
    let multi_line = text.contains(['\n', '\r']);
    let fits = text.chars().count() <= max_chars;

    match (multi_line, fits) {
        (false, true) => Cow::Borrowed(text),
        _ => {
            let mut out: String = text
                .chars()
                .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                .take(max_chars)
                .collect();
            if !fits {
                out.push(ELLIPSIS);
            }
            Cow::Owned(out)
        }
    }
}

/// Upper-cased first character of the mailbox part of an email.
///
/// Empty when the address starts with "@".
pub fn author_initial(email: &str) -> String {
    email
        .split('@')
        .next()
        .and_then(|local| local.chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Response time cell, flagged when strictly above `slow_threshold_ms`.
pub fn format_duration(response_time_ms: u64, slow_threshold_ms: u64) -> String {
    if response_time_ms > slow_threshold_ms {
        format!("{response_time_ms}ms{SLOW_MARKER}")
    } else {
        format!("{response_time_ms}ms")
    }
}
