//! Tests for plain-text result rendering.

use super::*;
use crate::model::{Author, AuthorId, DateRange, EntryId, EntryStatus, LogEntry};
use crate::query::query;
use chrono::{NaiveDate, NaiveDateTime};

fn entry(id: &str, timestamp: &str, question: &str, ms: u64, status: EntryStatus) -> LogEntry {
    LogEntry::new(
        EntryId::new(id).expect("valid id"),
        Author::new(AuthorId::new("alex.dev").expect("valid id"), "alex.dev@team.co"),
        question,
        "A short answer",
        timestamp.parse::<NaiveDateTime>().expect("valid timestamp"),
        ms,
        status,
    )
}

fn source() -> Vec<LogEntry> {
    vec![
        entry(
            "q-1",
            "2024-03-05T15:45:00",
            "How do I implement a binary search tree in Python?",
            620,
            EntryStatus::Completed,
        ),
        entry(
            "q-2",
            "2024-03-04T09:30:00",
            "Generate a Q3 sales report",
            4200,
            EntryStatus::Pending,
        ),
        entry("q-3", "2024-03-03T11:00:00", "Rust lifetimes explained", 950, EntryStatus::Failed),
    ]
}

#[test]
fn renders_title_metrics_and_rows() {
    let params = QueryParams::default();
    let result = query(&params, &source());

    let text = render_result(&result, &params, &ViewOptions::default());

    assert!(text.starts_with("Question Log · All Time\n"));
    assert!(text.contains("Total queries: 3   Avg. response: 1923ms   Success rate: 33%"));
    assert!(text.contains("TIMESTAMP ↓"));
    assert!(text.contains("Mar 5, 2024, 3:45 PM"));
    assert!(text.contains("4200ms !"));
    assert!(text.contains("Showing 3 of 3"));
    assert!(!text.contains("Page 1 of"), "single page has no pager");
}

#[test]
fn rows_follow_sort_order() {
    let params = QueryParams::default().with_sort(SortDirection::Asc);
    let result = query(&params, &source());

    let text = render_result(&result, &params, &ViewOptions::default());

    let first = text.find("Rust lifetimes").expect("q-3 rendered");
    let last = text.find("binary search tree").expect("q-1 rendered");
    assert!(first < last);
    assert!(text.contains("TIMESTAMP ↑"));
}

#[test]
fn long_questions_are_truncated() {
    let params = QueryParams::default();
    let result = query(&params, &source());
    let options = ViewOptions {
        preview_length: 12,
        slow_response_ms: 2000,
    };

    let text = render_result(&result, &params, &options);

    assert!(text.contains("How do I imp…"));
    assert!(!text.contains("binary search tree"));
}

#[test]
fn search_and_range_are_echoed() {
    let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let params = QueryParams::default()
        .with_search("rust")
        .with_range(DateRange::days(first, last));
    let result = query(&params, &source());

    let text = render_result(&result, &params, &ViewOptions::default());

    assert!(text.starts_with("Question Log · Mar 1 - Mar 7, 2024\n"));
    assert!(text.contains("Search: \"rust\""));
    assert!(text.contains("Showing 1 of 1"));
}

#[test]
fn empty_page_says_so_but_keeps_metrics() {
    let params = QueryParams::default().with_search("no such text");
    let result = query(&params, &source());

    let text = render_result(&result, &params, &ViewOptions::default());

    assert!(text.contains("No questions match the current filters."));
    assert!(text.contains("Total queries: 3"));
    assert!(text.contains("Showing 0 of 0"));
}

#[test]
fn pager_marks_current_page_and_neighbours() {
    let params = QueryParams::default().with_page(2, 1);
    let result = query(&params, &source());

    let text = render_result(&result, &params, &ViewOptions::default());

    assert!(text.contains("Page 2 of 3: 1 [2] 3   previous: --page 1   next: --page 3"));
}

#[test]
fn pager_on_last_page_has_no_next() {
    let params = QueryParams::default().with_page(9, 1);
    let result = query(&params, &source());

    let text = render_result(&result, &params, &ViewOptions::default());

    assert!(text.contains("Page 3 of 3: 1 2 [3]   previous: --page 2\n"));
}

#[test]
fn view_options_follow_config() {
    let config = ResolvedConfig {
        preview_length: 0,
        slow_response_ms: 500,
        ..ResolvedConfig::default()
    };

    let options = ViewOptions::from(&config);

    assert_eq!(options.preview_length, 1);
    assert_eq!(options.slow_response_ms, 500);
}

#[test]
fn entry_detail_shows_full_text_and_slow_marker() {
    let long_question = "word ".repeat(40);
    let asked_at: NaiveDateTime = "2024-03-05T15:45:00".parse().expect("valid timestamp");
    let detail = LogEntry::new(
        EntryId::new("q-9").expect("valid id"),
        Author::new(AuthorId::new("alex.dev").expect("valid id"), "alex.dev@team.co"),
        long_question.trim_end(),
        "line one\nline two",
        asked_at,
        4200,
        EntryStatus::Pending,
    );

    let text = render_entry(&detail, &ViewOptions::default());

    assert!(text.starts_with("Question q-9\n"));
    assert!(text.contains("User: alex.dev@team.co (A)"));
    assert!(text.contains("Timestamp: Mar 5, 2024, 3:45 PM"));
    assert!(text.contains("Response time: 4200ms !"));
    assert!(text.contains("Status: Pending"));
    assert!(text.contains(long_question.trim_end()));
    assert!(text.contains("AI RESPONSE\nline one\nline two\n"));
    assert!(!text.contains('…'));
}
