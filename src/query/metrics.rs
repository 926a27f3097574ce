//! Aggregate health metrics over a whole repository.

use crate::model::LogEntry;
use serde::Serialize;

/// Aggregate statistics over the entire, unfiltered repository.
///
/// # Invariants
///
/// - `total` is the size of the repository, never of a filtered view
/// - all fields are zero for an empty repository
/// - `success_rate_percent <= 100`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Number of entries in the repository.
    pub total: usize,
    /// Mean response time, rounded half-up to a whole millisecond.
    pub avg_response_ms: u64,
    /// Share of `Completed` entries, rounded half-up to a whole percent.
    pub success_rate_percent: u32,
}

impl Metrics {
    /// Compute metrics over every entry in `source`.
    pub fn compute(source: &[LogEntry]) -> Self {
        let total = source.len();
        if total == 0 {
            return Self::default();
        }

        let response_sum: u128 = source
            .iter()
            .map(|e| u128::from(e.response_time_ms()))
            .sum();
        let completed = source.iter().filter(|e| e.is_completed()).count();

        let n = total as u128;
        let avg_response_ms = round_div(response_sum, n);
        let success_rate_percent = round_div(100 * completed as u128, n);

        Self {
            total,
            avg_response_ms: u64::try_from(avg_response_ms).unwrap_or(u64::MAX),
            success_rate_percent: u32::try_from(success_rate_percent).unwrap_or(100),
        }
    }
}

/// `numerator / denominator` rounded half-up. `denominator` must be non-zero.
fn round_div(numerator: u128, denominator: u128) -> u128 {
    (2 * numerator + denominator) / (2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Author, AuthorId, EntryId, EntryStatus};

    fn entry(id: &str, response_time_ms: u64, status: EntryStatus) -> LogEntry {
        LogEntry::new(
            EntryId::new(id).expect("valid id"),
            Author::new(AuthorId::new("user1").expect("valid id"), "user1@example.com"),
            "question",
            "answer",
            "2024-03-05T12:00:00".parse().expect("valid timestamp"),
            response_time_ms,
            status,
        )
    }

    #[test]
    fn empty_repository_yields_zero_metrics() {
        assert_eq!(
            Metrics::compute(&[]),
            Metrics {
                total: 0,
                avg_response_ms: 0,
                success_rate_percent: 0
            }
        );
    }

    #[test]
    fn average_rounds_half_up() {
        let source = [
            entry("a", 100, EntryStatus::Completed),
            entry("b", 201, EntryStatus::Completed),
        ];
        // 301 / 2 = 150.5
        assert_eq!(Metrics::compute(&source).avg_response_ms, 151);
    }

    #[test]
    fn average_rounds_down_below_half() {
        let source = [
            entry("a", 100, EntryStatus::Completed),
            entry("b", 100, EntryStatus::Completed),
            entry("c", 101, EntryStatus::Completed),
        ];
        // 301 / 3 = 100.33
        assert_eq!(Metrics::compute(&source).avg_response_ms, 100);
    }

    #[test]
    fn success_rate_counts_only_completed() {
        let source = [
            entry("a", 1, EntryStatus::Completed),
            entry("b", 1, EntryStatus::Pending),
            entry("c", 1, EntryStatus::Failed),
        ];
        // 100 / 3 = 33.3
        let metrics = Metrics::compute(&source);
        assert_eq!(metrics.success_rate_percent, 33);
        assert_eq!(metrics.total, 3);
    }

    #[test]
    fn success_rate_rounds_two_thirds_up() {
        let source = [
            entry("a", 1, EntryStatus::Completed),
            entry("b", 1, EntryStatus::Completed),
            entry("c", 1, EntryStatus::Failed),
        ];
        assert_eq!(Metrics::compute(&source).success_rate_percent, 67);
    }

    #[test]
    fn all_completed_is_one_hundred_percent() {
        let source = [
            entry("a", 1, EntryStatus::Completed),
            entry("b", 1, EntryStatus::Completed),
        ];
        assert_eq!(Metrics::compute(&source).success_rate_percent, 100);
    }
}
