//! Calendar-date helpers: the `DD/MM/YYYY` text boundary, presets and month arithmetic.
//!
//! All free-text date parsing happens in [`parse_date`]. Nothing else in the
//! crate interprets user-typed date text, so invalid text can never reach a
//! committed [`crate::model::DateRange`].

pub mod preset;

pub use preset::{Preset, UnknownPreset};

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Display/entry pattern for dates, as understood by `chrono::format`.
pub const DATE_PATTERN: &str = "%d/%m/%Y";

/// Why a date text was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidDateText {
    /// Not exactly `DD/MM/YYYY` with ASCII digits.
    #[error("expected a date formatted as DD/MM/YYYY")]
    Malformed,
    /// Well-formed but names a day that does not exist (e.g. 31/02/2024).
    #[error("not a real calendar date")]
    NotACalendarDate,
}

/// Parse `DD/MM/YYYY` into a calendar date.
///
/// Partial input such as `"12/0"` is `Malformed`; impossible dates such as
/// `"31/04/2024"` are `NotACalendarDate`. No partial date is ever returned.
pub fn parse_date(text: &str) -> Result<NaiveDate, InvalidDateText> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return Err(InvalidDateText::Malformed);
    }

    let day = digits(&bytes[0..2])?;
    let month = digits(&bytes[3..5])?;
    let year = digits(&bytes[6..10])?;

    // from_ymd_opt rejects day/month combinations that do not exist
    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or(InvalidDateText::NotACalendarDate)
}

fn digits(field: &[u8]) -> Result<u32, InvalidDateText> {
    field.iter().try_fold(0u32, |acc, b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + u32::from(b - b'0'))
        } else {
            Err(InvalidDateText::Malformed)
        }
    })
}

/// Format a date as `DD/MM/YYYY`; an unset bound formats as the empty string.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_PATTERN).to_string())
        .unwrap_or_default()
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable millisecond of `date` (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}

/// Signed number of calendar months from `from`'s month to `to`'s month.
///
/// Days are ignored: Jan 31 to Feb 1 is one month.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month0() as i32 - from.month0() as i32)
}

/// First day of the month `offset` months away from `today`'s month.
///
/// Saturates at `today`'s month if the shifted month is outside chrono's range.
pub fn month_start(today: NaiveDate, offset: i32) -> NaiveDate {
    let first = today.with_day(1).unwrap_or(today);
    let shifted = if offset >= 0 {
        first.checked_add_months(Months::new(offset.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(offset.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn parses_well_formed_date() {
        assert_eq!(parse_date("05/03/2024"), Ok(ymd(2024, 3, 5)));
    }

    #[test]
    fn parses_leap_day_in_leap_year() {
        assert_eq!(parse_date("29/02/2024"), Ok(ymd(2024, 2, 29)));
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        for text in [
            "31/02/2024",
            "29/02/2023",
            "31/04/2024",
            "00/01/2024",
            "15/13/2024",
            "10/00/2024",
        ] {
            assert_eq!(
                parse_date(text),
                Err(InvalidDateText::NotACalendarDate),
                "{} should not be a calendar date",
                text
            );
        }
    }

    #[test]
    fn rejects_partial_and_malformed_text() {
        for text in [
            "",
            "1",
            "05/03",
            "05/03/24",
            "5/3/2024",
            "05-03-2024",
            "05/03/2024 ",
            "ab/cd/efgh",
            "05/03/20245",
        ] {
            assert_eq!(
                parse_date(text),
                Err(InvalidDateText::Malformed),
                "{:?} should be malformed",
                text
            );
        }
    }

    #[test]
    fn rejects_non_ascii_digits() {
        // Arabic-Indic digit five is a digit in Unicode but not in the pattern
        assert_eq!(parse_date("٥٥/03/2024"), Err(InvalidDateText::Malformed));
    }

    #[test]
    fn format_pads_day_and_month() {
        assert_eq!(format_date(Some(ymd(2024, 3, 5))), "05/03/2024");
    }

    #[test]
    fn format_of_unset_bound_is_empty() {
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn format_then_parse_returns_same_date() {
        let date = ymd(1999, 12, 31);
        assert_eq!(parse_date(&format_date(Some(date))), Ok(date));
    }

    #[test]
    fn end_of_day_is_last_millisecond() {
        let eod = end_of_day(ymd(2024, 3, 5));
        assert_eq!(eod, "2024-03-05T23:59:59.999".parse::<NaiveDateTime>().expect("valid"));
    }

    #[test]
    fn months_between_spans_years() {
        assert_eq!(months_between(ymd(2026, 10, 16), ymd(2026, 10, 1)), 0);
        assert_eq!(months_between(ymd(2026, 10, 16), ymd(2026, 8, 31)), -2);
        assert_eq!(months_between(ymd(2026, 10, 16), ymd(2025, 12, 1)), -10);
        assert_eq!(months_between(ymd(2026, 1, 31), ymd(2026, 2, 1)), 1);
    }

    #[test]
    fn month_start_shifts_by_offset() {
        let today = ymd(2026, 10, 16);
        assert_eq!(month_start(today, 0), ymd(2026, 10, 1));
        assert_eq!(month_start(today, 1), ymd(2026, 11, 1));
        assert_eq!(month_start(today, 3), ymd(2027, 1, 1));
        assert_eq!(month_start(today, -12), ymd(2025, 10, 1));
    }

    #[test]
    fn month_start_inverts_months_between() {
        let today = ymd(2026, 10, 16);
        let target = ymd(2023, 2, 14);
        assert_eq!(month_start(today, months_between(today, target)), ymd(2023, 2, 1));
    }
}
