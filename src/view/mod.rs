//! Plain-text rendering of query results (impure shell).
//!
//! The output mirrors the log page: a title with the range label, the
//! metrics line, the question table, a "Showing n of total" line and the
//! pager when there is more than one page. [`render_entry`] prints one entry
//! in full for the detail view.

pub mod constants;
pub mod format;

pub use format::{
    author_initial, format_duration, format_timestamp, month_label, range_label, truncate,
};

use crate::config::ResolvedConfig;
use crate::model::LogEntry;
use crate::query::{QueryParams, QueryResult, SortDirection};
use constants::{
    DURATION_WIDTH, SORT_ASC_ARROW, SORT_DESC_ARROW, STATUS_WIDTH, TIMESTAMP_WIDTH, USER_WIDTH,
};
use std::fmt::Write;

/// Display settings for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Characters of question and answer text before truncation.
    pub preview_length: usize,
    /// Responses slower than this are marked.
    pub slow_response_ms: u64,
}

impl From<&ResolvedConfig> for ViewOptions {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            preview_length: config.preview_length.max(1),
            slow_response_ms: config.slow_response_ms,
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from(&ResolvedConfig::default())
    }
}

/// Render one page of results as text.
///
/// `params` supplies the range label, the search echo and the sort arrow.
pub fn render_result(
    result: &QueryResult,
    params: &QueryParams,
    options: &ViewOptions,
) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Question Log · {}", range_label(&params.range()));
    if !params.search.is_empty() {
        let _ = writeln!(out, "Search: \"{}\"", params.search);
    }
    let _ = writeln!(
        out,
        "Total queries: {}   Avg. response: {}ms   Success rate: {}%",
        result.metrics.total, result.metrics.avg_response_ms, result.metrics.success_rate_percent
    );
    out.push('\n');

    if result.items.is_empty() {
        out.push_str("No questions match the current filters.\n");
    } else {
        render_table(&mut out, result, params.sort_direction, options);
    }

    out.push('\n');
    let _ = writeln!(out, "Showing {} of {}", result.items.len(), result.total);
    if let Some(pager) = pager_line(result) {
        let _ = writeln!(out, "{pager}");
    }

    out
}

/// Render one entry in full: metadata, then the untruncated question and answer.
pub fn render_entry(entry: &LogEntry, options: &ViewOptions) -> String {
    let mut out = String::new();
    let email = entry.author().email();

    let _ = writeln!(out, "Question {}", entry.id());
    let _ = writeln!(out, "User: {} ({})", email, author_initial(email));
    let _ = writeln!(out, "Timestamp: {}", format_timestamp(entry.timestamp()));
    let _ = writeln!(
        out,
        "Response time: {}",
        format_duration(entry.response_time_ms(), options.slow_response_ms)
    );
    let _ = writeln!(out, "Status: {}", entry.status());
    out.push('\n');
    out.push_str("QUESTION\n");
    let _ = writeln!(out, "{}", entry.question_text());
    out.push('\n');
    out.push_str("AI RESPONSE\n");
    let _ = writeln!(out, "{}", entry.response_text());

    out
}

fn render_table(
    out: &mut String,
    result: &QueryResult,
    sort: SortDirection,
    options: &ViewOptions,
) {
    let width = options.preview_length.saturating_add(1);
    let arrow = match sort {
        SortDirection::Desc => SORT_DESC_ARROW,
        SortDirection::Asc => SORT_ASC_ARROW,
    };
    let timestamp_header = format!("TIMESTAMP {arrow}");

    let _ = writeln!(
        out,
        "{:<TIMESTAMP_WIDTH$}{:<USER_WIDTH$}{:<width$}  {:<width$}  {:<DURATION_WIDTH$}{:<STATUS_WIDTH$}",
        timestamp_header, "USER", "QUESTION", "ANSWER", "DURATION", "STATUS"
    );

    for entry in &result.items {
        let row = format!(
            "{:<TIMESTAMP_WIDTH$}{:<USER_WIDTH$}{:<width$}  {:<width$}  {:<DURATION_WIDTH$}{:<STATUS_WIDTH$}",
            format_timestamp(entry.timestamp()),
            author_initial(entry.author().email()),
            truncate(entry.question_text(), options.preview_length),
            truncate(entry.response_text(), options.preview_length),
            format_duration(entry.response_time_ms(), options.slow_response_ms),
            entry.status(),
        );
        let _ = writeln!(out, "{}", row.trim_end());
    }
}

/// "Page 2 of 3: 1 [2] 3", or `None` when everything fits on one page.
fn pager_line(result: &QueryResult) -> Option<String> {
    let pagination = result.pagination();
    if !pagination.is_paged() {
        return None;
    }

    let pages: Vec<String> = pagination
        .page_numbers()
        .map(|n| {
            if n == pagination.page() {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();

    let mut line = format!(
        "Page {} of {}: {}",
        pagination.page(),
        pagination.total_pages(),
        pages.join(" ")
    );
    if let Some(previous) = pagination.previous() {
        let _ = write!(line, "   previous: --page {previous}");
    }
    if let Some(next) = pagination.next() {
        let _ = write!(line, "   next: --page {next}");
    }
    Some(line)
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
