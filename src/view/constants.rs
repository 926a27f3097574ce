//! Column and marker constants for the plain-text table.
//!
//! Centralized so the header and the rows stay aligned.

/// Width of the timestamp column ("Mar 15, 2024, 12:45 PM" plus padding).
pub const TIMESTAMP_WIDTH: usize = 24;

/// Width of the author initial column.
pub const USER_WIDTH: usize = 5;

/// Width of the duration column, room for the slow marker included.
pub const DURATION_WIDTH: usize = 12;

/// Width of the status column.
pub const STATUS_WIDTH: usize = 10;

/// Appended to a truncated preview.
pub const ELLIPSIS: char = '…';

/// Suffix for responses slower than the configured threshold.
pub const SLOW_MARKER: &str = " !";

/// Header arrow for a descending timestamp sort.
pub const SORT_DESC_ARROW: &str = "↓";

/// Header arrow for an ascending timestamp sort.
pub const SORT_ASC_ARROW: &str = "↑";
