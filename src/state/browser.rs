//! Caller-side browsing state for the log page.
//!
//! Holds the current [`QueryParams`] and applies the page-reset rules of the
//! log page: any change to the search text, the date range or the sort
//! direction returns to the first page.

use crate::model::{DateRange, LogEntry};
use crate::query::{self, QueryParams, QueryResult, SortDirection};
use tracing::debug;

/// Current search text, date range, sort and page of the log browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserState {
    params: QueryParams,
}

impl BrowserState {
    /// Start on page 1 with no filters.
    pub fn new(page_size: usize, sort_direction: SortDirection) -> Self {
        Self {
            params: QueryParams::default()
                .with_page(1, page_size.max(1))
                .with_sort(sort_direction),
        }
    }

    /// Parameters the next [`BrowserState::run`] will use.
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Replace the search text. Returns to page 1 when it changed.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.params.search {
            debug!(%search, "search changed");
            self.params.search = search;
            self.params.page = 1;
        }
    }

    /// Replace the date range. Returns to page 1 when it changed.
    pub fn set_range(&mut self, range: DateRange) {
        if range != self.params.range() {
            debug!(?range, "date range changed");
            self.params.from = range.start;
            self.params.to = range.end;
            self.params.page = 1;
        }
    }

    /// Flip the timestamp sort and return to page 1.
    pub fn toggle_sort(&mut self) {
        self.params.sort_direction = self.params.sort_direction.toggled();
        self.params.page = 1;
    }

    /// Request a page. Values past the end are clamped by the query, not here.
    pub fn go_to_page(&mut self, page: usize) {
        self.params.page = page.max(1);
    }

    /// Evaluate the current parameters against `source`.
    pub fn run(&self, source: &[LogEntry]) -> QueryResult {
        query::query(&self.params, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().expect("valid timestamp")
    }

    #[test]
    fn new_state_starts_on_first_page() {
        let state = BrowserState::new(6, SortDirection::Desc);

        assert_eq!(state.params().page, 1);
        assert_eq!(state.params().page_size, 6);
        assert_eq!(state.params().sort_direction, SortDirection::Desc);
    }

    #[test]
    fn changing_search_returns_to_first_page() {
        let mut state = BrowserState::new(6, SortDirection::Desc);
        state.go_to_page(4);

        state.set_search("react");

        assert_eq!(state.params().page, 1);
        assert_eq!(state.params().search, "react");
    }

    #[test]
    fn unchanged_search_keeps_page() {
        let mut state = BrowserState::new(6, SortDirection::Desc);
        state.set_search("react");
        state.go_to_page(3);

        state.set_search("react");

        assert_eq!(state.params().page, 3);
    }

    #[test]
    fn changing_range_returns_to_first_page() {
        let mut state = BrowserState::new(6, SortDirection::Desc);
        state.go_to_page(2);

        let range = DateRange::between(at("2024-03-01T00:00:00"), at("2024-03-07T00:00:00"));
        state.set_range(range);

        assert_eq!(state.params().page, 1);
        assert_eq!(state.params().range(), range);
    }

    #[test]
    fn toggling_sort_flips_direction_and_resets_page() {
        let mut state = BrowserState::new(6, SortDirection::Desc);
        state.go_to_page(2);

        state.toggle_sort();

        assert_eq!(state.params().sort_direction, SortDirection::Asc);
        assert_eq!(state.params().page, 1);
    }

    #[test]
    fn go_to_page_never_stores_zero() {
        let mut state = BrowserState::new(6, SortDirection::Desc);
        state.go_to_page(0);
        assert_eq!(state.params().page, 1);
    }

    #[test]
    fn run_clamps_requested_page() {
        let mut state = BrowserState::new(6, SortDirection::Desc);
        state.go_to_page(50);

        let result = state.run(&[]);

        assert_eq!(result.page, 1);
        assert_eq!(result.total_pages, 1);
    }
}
