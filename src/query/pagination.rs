//! Page-count and clamping arithmetic shared by the query engine and pager UIs.

use serde::Serialize;
use std::ops::{Range, RangeInclusive};

/// Resolved pagination for a result set.
///
/// # Invariants
///
/// - `page_size >= 1`
/// - `total_pages == max(1, ceil(total / page_size))`
/// - `1 <= page <= total_pages`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    page: usize,
    page_size: usize,
    total: usize,
    total_pages: usize,
}

impl Pagination {
    /// Resolve `requested_page` against `total` items.
    ///
    /// A zero `page_size` is treated as 1 and a zero page as the first page.
    /// Pages past the end clamp to the last page; this never fails.
    pub fn new(total: usize, page_size: usize, requested_page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size).max(1);
        let page = requested_page.clamp(1, total_pages);
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }

    /// Effective (clamped) 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page (at least 1).
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items across all pages.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Index range of the current page within the full result set.
    ///
    /// Always within `0..=total`; empty only when `total == 0`.
    pub fn slice_range(&self) -> Range<usize> {
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total);
        start.min(end)..end
    }

    /// True unless on the first page.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// True unless on the last page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page reached by the "previous" control, if enabled.
    pub fn previous(&self) -> Option<usize> {
        self.has_previous().then(|| self.page - 1)
    }

    /// Page reached by the "next" control, if enabled.
    pub fn next(&self) -> Option<usize> {
        self.has_next().then(|| self.page + 1)
    }

    /// All selectable page numbers.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }

    /// A pager is only worth showing with more than one page.
    pub fn is_paged(&self) -> bool {
        self.total_pages > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_one_page() {
        let p = Pagination::new(0, 10, 1);
        assert_eq!(p.total_pages(), 1);
        assert_eq!(p.page(), 1);
        assert_eq!(p.slice_range(), 0..0);
        assert!(!p.is_paged());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(10, 10, 1).total_pages(), 1);
        assert_eq!(Pagination::new(11, 10, 1).total_pages(), 2);
        assert_eq!(Pagination::new(21, 5, 1).total_pages(), 5);
    }

    #[test]
    fn page_past_end_clamps_to_last_page() {
        let p = Pagination::new(23, 10, 9999);
        assert_eq!(p.page(), 3);
        assert_eq!(p.slice_range(), 20..23);
    }

    #[test]
    fn zero_page_is_first_page() {
        assert_eq!(Pagination::new(23, 10, 0).page(), 1);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let p = Pagination::new(3, 0, 2);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.slice_range(), 1..2);
    }

    #[test]
    fn middle_page_slice() {
        let p = Pagination::new(23, 10, 2);
        assert_eq!(p.slice_range(), 10..20);
    }

    #[test]
    fn navigation_is_disabled_at_edges() {
        let first = Pagination::new(23, 10, 1);
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(2));

        let last = Pagination::new(23, 10, 3);
        assert_eq!(last.previous(), Some(2));
        assert_eq!(last.next(), None);
    }

    #[test]
    fn page_numbers_cover_all_pages() {
        let p = Pagination::new(23, 10, 1);
        assert_eq!(p.page_numbers().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
