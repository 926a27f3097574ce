//! Query engine: filter → sort → paginate → metrics over a log repository.
//!
//! [`query`] is a pure, total function of its two inputs. It never mutates
//! the repository and returns identical results for identical arguments,
//! so callers may memoize it freely.

pub mod metrics;
pub mod pagination;

pub use metrics::Metrics;
pub use pagination::Pagination;

use crate::date::{end_of_day, start_of_day};
use crate::model::{DateRange, EntryId, LogEntry};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Default number of entries per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ===== SortDirection =====

/// Direction of the timestamp sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Lowercase name as accepted by `--sort`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort direction string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort direction '{0}' (expected 'asc' or 'desc')")]
pub struct UnknownSortDirection(pub String);

impl FromStr for SortDirection {
    type Err = UnknownSortDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(UnknownSortDirection(other.to_string())),
        }
    }
}

// ===== QueryParams =====

/// Parameters of one query.
///
/// `page` and `page_size` are 1-based and at least 1; zero values are
/// treated as 1 rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Requested 1-based page.
    pub page: usize,
    /// Entries per page.
    pub page_size: usize,
    /// Case-insensitive substring; empty matches everything.
    pub search: String,
    /// Lower date bound, if any.
    pub from: Option<NaiveDateTime>,
    /// Upper date bound, if any.
    pub to: Option<NaiveDateTime>,
    /// Timestamp sort direction.
    pub sort_direction: SortDirection,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            from: None,
            to: None,
            sort_direction: SortDirection::Desc,
        }
    }
}

impl QueryParams {
    /// Set `from`/`to` from a selector range.
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.from = range.start;
        self.to = range.end;
        self
    }

    /// Set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the requested page and page size.
    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Set the sort direction.
    pub fn with_sort(mut self, sort_direction: SortDirection) -> Self {
        self.sort_direction = sort_direction;
        self
    }

    /// The date bounds as a range value.
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.from,
            end: self.to,
        }
    }
}

// ===== QueryResult =====

/// One page of matching entries plus whole-repository metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Entries on the effective page, in sort order (at most `page_size`).
    pub items: Vec<LogEntry>,
    /// Effective page after clamping.
    pub page: usize,
    /// Effective page size (at least 1).
    pub page_size: usize,
    /// Number of entries matching the filters, across all pages.
    pub total: usize,
    /// Number of pages, at least 1 even when nothing matched.
    pub total_pages: usize,
    /// Computed over the unfiltered repository.
    pub metrics: Metrics,
}

impl QueryResult {
    /// Pagination state matching this result.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.total, self.page_size, self.page)
    }
}

// ===== Pipeline =====

/// Run the full query pipeline over `source`.
///
/// 1. Text filter (case-insensitive substring of the space-joined question, answer and email)
/// 2. Date filter (see [`DateWindow`])
/// 3. Sort by timestamp in `sort_direction`, ties broken by ascending id
/// 4. Paginate, clamping `page` to the last page
/// 5. Metrics over the whole of `source`
pub fn query(params: &QueryParams, source: &[LogEntry]) -> QueryResult {
    let needle = params.search.to_lowercase();
    let window = DateWindow::new(params.from, params.to);

    let mut matched: Vec<&LogEntry> = source
        .iter()
        .filter(|entry| matches_text(entry, &needle))
        .filter(|entry| window.contains(entry.timestamp()))
        .collect();

    matched.sort_by(|a, b| compare_entries(a, b, params.sort_direction));

    let pagination = Pagination::new(matched.len(), params.page_size, params.page);
    let items = matched[pagination.slice_range()]
        .iter()
        .copied()
        .cloned()
        .collect();

    debug!(
        source = source.len(),
        matched = pagination.total(),
        page = pagination.page(),
        total_pages = pagination.total_pages(),
        "query evaluated"
    );

    QueryResult {
        items,
        page: pagination.page(),
        page_size: pagination.page_size(),
        total: pagination.total(),
        total_pages: pagination.total_pages(),
        metrics: Metrics::compute(source),
    }
}

/// Look up one entry by id, as the detail view does.
pub fn find_by_id<'a>(source: &'a [LogEntry], id: &EntryId) -> Option<&'a LogEntry> {
    source.iter().find(|entry| entry.id() == id)
}

/// True if `needle` (already lowercased) occurs in the space-joined
/// question, answer and author email.
fn matches_text(entry: &LogEntry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack = format!(
        "{} {} {}",
        entry.question_text(),
        entry.response_text(),
        entry.author().email()
    )
    .to_lowercase();
    haystack.contains(needle)
}

/// Timestamp order in `direction`, then ascending id regardless of direction.
fn compare_entries(a: &LogEntry, b: &LogEntry, direction: SortDirection) -> Ordering {
    let by_time = match direction {
        SortDirection::Asc => a.timestamp().cmp(&b.timestamp()),
        SortDirection::Desc => b.timestamp().cmp(&a.timestamp()),
    };
    by_time.then_with(|| a.id().cmp(b.id()))
}

/// Inclusive instant bounds derived from a `from`/`to` pair.
///
/// - both set: `[from 00:00:00.000, to 23:59:59.999]`
/// - only `from`: `[from, ∞)`, using `from`'s own time of day
/// - only `to`: `(-∞, to 23:59:59.999]`
/// - neither: unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    lower: Option<NaiveDateTime>,
    upper: Option<NaiveDateTime>,
}

impl DateWindow {
    /// Window for the given query bounds.
    pub fn new(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Self {
        match (from, to) {
            (Some(from), Some(to)) => Self {
                lower: Some(start_of_day(from.date())),
                upper: Some(end_of_day(to.date())),
            },
            (Some(from), None) => Self {
                lower: Some(from),
                upper: None,
            },
            (None, Some(to)) => Self {
                lower: None,
                upper: Some(end_of_day(to.date())),
            },
            (None, None) => Self {
                lower: None,
                upper: None,
            },
        }
    }

    /// True if `instant` lies within both bounds, inclusive.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.lower.is_none_or(|lower| instant >= lower)
            && self.upper.is_none_or(|upper| instant <= upper)
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
