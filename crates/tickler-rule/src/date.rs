//! Canonical date text (`YYYYMMDD`).

use chrono::{Datelike, NaiveDate};

use crate::error::{RuleError, RuleResult};

/// `chrono` format string of the canonical date text.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Last year that fits the four-digit year field.
pub const MAX_YEAR: i32 = 9999;

/// Returns `true` if `date` formats as eight digits.
#[must_use]
pub fn is_representable(date: NaiveDate) -> bool {
    (0..=MAX_YEAR).contains(&date.year())
}

/// Parses canonical date text.
///
/// Format: exactly eight ASCII digits, `YYYYMMDD` (e.g., "20240229").
///
/// ## Errors
/// Returns [`RuleError::InvalidDateFormat`] if the text is not eight digits
/// or does not name a real calendar day.
pub fn parse_date(s: &str) -> RuleResult<NaiveDate> {
    let invalid = || RuleError::InvalidDateFormat(s.to_string());

    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let year = s[0..4].parse::<i32>().map_err(|_err| invalid())?;
    let month = s[4..6].parse::<u32>().map_err(|_err| invalid())?;
    let day = s[6..8].parse::<u32>().map_err(|_err| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Formats a date as canonical text.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_basic() {
        let date = parse_date("20240229").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 2);
        assert_eq!(date.day(), 29);
    }

    #[test]
    fn parse_date_rejects_impossible_days() {
        assert!(parse_date("20230229").is_err()); // not a leap year
        assert!(parse_date("20240431").is_err());
        assert!(parse_date("20241301").is_err());
        assert!(parse_date("20240100").is_err());
    }

    #[test]
    fn parse_date_rejects_wrong_shape() {
        for text in ["", "2024021", "202402150", "2024-02-15", "+2024021", "2024O215", " 20240215"] {
            assert_eq!(
                parse_date(text),
                Err(RuleError::InvalidDateFormat(text.to_string())),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn format_date_pads_fields() {
        let date = NaiveDate::from_ymd_opt(987, 3, 4).unwrap();
        assert_eq!(format_date(date), "09870304");
    }

    #[test]
    fn every_day_of_a_leap_year_round_trips() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while date.year() == 2024 {
            assert_eq!(parse_date(&format_date(date)).unwrap(), date);
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn representable_years_are_four_digits() {
        let last = NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap();
        assert!(is_representable(last));
        assert_eq!(format_date(last), "99991231");
        assert!(!is_representable(last.succ_opt().unwrap()));
    }
}
