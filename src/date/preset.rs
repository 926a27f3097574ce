//! Named date-range shortcuts anchored to "now".
//!
//! Each preset is a pure function of the current moment. The resolved bounds
//! keep the time of day of `now`; consumers compare them by calendar date.

use crate::model::DateRange;
use chrono::{Days, NaiveDateTime};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named, time-anchored shortcut range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// No constraint.
    AllTime,
    /// Today only.
    Today,
    /// Yesterday only.
    Yesterday,
    /// Today and the six days before it.
    Last7Days,
    /// Today and the 29 days before it.
    Last30Days,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Preset; 5] = [
        Preset::AllTime,
        Preset::Today,
        Preset::Yesterday,
        Preset::Last7Days,
        Preset::Last30Days,
    ];

    /// Presets tried when inferring a mode from a range, highest priority first.
    /// `AllTime` is matched separately on the empty range.
    pub const INFERENCE_ORDER: [Preset; 4] = [
        Preset::Today,
        Preset::Yesterday,
        Preset::Last7Days,
        Preset::Last30Days,
    ];

    /// Stable identifier, accepted by [`FromStr`].
    pub fn id(&self) -> &'static str {
        match self {
            Preset::AllTime => "all-time",
            Preset::Today => "today",
            Preset::Yesterday => "yesterday",
            Preset::Last7Days => "last-7-days",
            Preset::Last30Days => "last-30-days",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Preset::AllTime => "All Time",
            Preset::Today => "Today",
            Preset::Yesterday => "Yesterday",
            Preset::Last7Days => "Last 7 Days",
            Preset::Last30Days => "Last 30 Days",
        }
    }

    /// Days before today covered by the range start, and before today covered by the end.
    fn span(&self) -> Option<(u64, u64)> {
        match self {
            Preset::AllTime => None,
            Preset::Today => Some((0, 0)),
            Preset::Yesterday => Some((1, 1)),
            Preset::Last7Days => Some((6, 0)),
            Preset::Last30Days => Some((29, 0)),
        }
    }

    /// Resolve to a concrete range anchored at `now`.
    pub fn resolve(&self, now: NaiveDateTime) -> DateRange {
        let Some((start_back, end_back)) = self.span() else {
            return DateRange::ALL_TIME;
        };
        let days_back = |n: u64| now.checked_sub_days(Days::new(n)).unwrap_or(now);
        DateRange {
            start: Some(days_back(start_back)),
            end: Some(days_back(end_back)),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unknown preset identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preset '{0}' (expected one of: all-time, today, yesterday, last-7-days, last-30-days)")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}
