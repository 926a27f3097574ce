//! Date range value shared by the selector and the query engine.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// An optionally bounded range of instants.
///
/// # Shapes
///
/// - `{None, None}`: no constraint (all time)
/// - `{Some, None}`: open selection, from `start` onward
/// - `{Some, Some}`: closed selection, `start <= end`
/// - `{None, Some}`: up to `end`; not produced by calendar clicks but
///   reachable through text entry and tolerated by the query engine
///
/// Fields are public so callers can build ranges directly; use
/// [`DateRange::between`] when the bounds may arrive out of order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// Lower bound.
    pub start: Option<NaiveDateTime>,
    /// Upper bound.
    pub end: Option<NaiveDateTime>,
}

/// Classification of a range by which bounds are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeShape {
    /// Neither bound set.
    Empty,
    /// Start set, end unset: awaiting a second click.
    Open,
    /// Both bounds set.
    Closed,
    /// End set without a start.
    EndOnly,
}

impl DateRange {
    /// The unconstrained range.
    pub const ALL_TIME: DateRange = DateRange {
        start: None,
        end: None,
    };

    /// Closed range with bounds in chronological order regardless of argument order.
    pub fn between(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        Self {
            start: Some(a.min(b)),
            end: Some(a.max(b)),
        }
    }

    /// Open range starting at `start`.
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Closed range covering whole calendar days `first..=last` (midnight bounds).
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self::between(first.and_time(NaiveTime::MIN), last.and_time(NaiveTime::MIN))
    }

    /// Which bounds are set.
    pub fn shape(&self) -> RangeShape {
        match (self.start, self.end) {
            (None, None) => RangeShape::Empty,
            (Some(_), None) => RangeShape::Open,
            (Some(_), Some(_)) => RangeShape::Closed,
            (None, Some(_)) => RangeShape::EndOnly,
        }
    }

    /// True when no bound is set.
    pub fn is_all_time(&self) -> bool {
        self.shape() == RangeShape::Empty
    }

    /// Calendar date of the start bound.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start.map(|s| s.date())
    }

    /// Calendar date of the end bound.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end.map(|e| e.date())
    }

    /// Compare two ranges by calendar date only, ignoring time of day.
    ///
    /// Unset bounds never match, so two open ranges with the same start are
    /// not considered equal here.
    pub fn same_days_as(&self, other: &DateRange) -> bool {
        let same = |a: Option<NaiveDate>, b: Option<NaiveDate>| {
            matches!((a, b), (Some(x), Some(y)) if x == y)
        };
        same(self.start_date(), other.start_date()) && same(self.end_date(), other.end_date())
    }
}
