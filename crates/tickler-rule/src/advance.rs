//! Stepping dates forward under a rule.
//!
//! Each rule kind defines a step (how far one recurrence unit moves a
//! candidate date) and a qualification test (whether a candidate is an
//! occurrence at all). Yearly and daily rules qualify every date they step
//! onto; weekly and monthly rules step one day at a time and filter.

use chrono::{Datelike, Days, NaiveDate};

use crate::date::is_representable;
use crate::rule::{MonthDay, Rule};

/// Returns `true` for Gregorian leap years.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in the given month (1..12) of `year`.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// ## Summary
/// Resolves a [`MonthDay`] to a concrete day number within one month.
///
/// A fixed day resolves to itself only if the month is long enough.
/// `Last` and `SecondToLast` are recomputed for every month, so February
/// yields 29/28 in leap years and 28/27 otherwise.
#[must_use]
pub fn resolve_month_day(day: MonthDay, year: i32, month: u32) -> Option<u32> {
    let length = days_in_month(year, month);
    match day {
        MonthDay::Day(n) => (n <= length).then_some(n),
        MonthDay::Last => Some(length),
        MonthDay::SecondToLast => Some(length - 1),
    }
}

/// ## Summary
/// Moves `date` forward by one recurrence unit of `rule`.
///
/// Returns `None` when the result would be past year 9999, the last year
/// canonical date text can carry.
#[must_use]
pub fn step(rule: &Rule, date: NaiveDate) -> Option<NaiveDate> {
    let next = match rule {
        Rule::Yearly => add_year(date),
        Rule::Daily { interval } => date.checked_add_days(Days::new(u64::from(*interval))),
        Rule::Weekly { .. } | Rule::Monthly { .. } => date.succ_opt(),
    }?;
    is_representable(next).then_some(next)
}

/// Adds one calendar year, rolling a 29 February that lands in a common year
/// over into 1 March.
fn add_year(date: NaiveDate) -> Option<NaiveDate> {
    let year = date.year().checked_add(1)?;
    NaiveDate::from_ymd_opt(year, date.month(), date.day()).or_else(|| {
        NaiveDate::from_ymd_opt(year, date.month(), 1)?
            .checked_add_days(Days::new(u64::from(date.day0())))
    })
}

/// Returns `true` if `date` is an occurrence of `rule`.
#[must_use]
pub fn qualifies(rule: &Rule, date: NaiveDate) -> bool {
    match rule {
        Rule::Yearly | Rule::Daily { .. } => true,
        Rule::Weekly { days } => days.contains(&date.weekday().number_from_monday()),
        Rule::Monthly { days, months } => {
            let month_matches = months
                .as_ref()
                .is_none_or(|months| months.contains(&date.month()));

            month_matches
                && days.iter().any(|day| {
                    resolve_month_day(*day, date.year(), date.month()) == Some(date.day())
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn last_day_of_february_follows_leap_years() {
        assert_eq!(resolve_month_day(MonthDay::Last, 2024, 2), Some(29));
        assert_eq!(resolve_month_day(MonthDay::Last, 2023, 2), Some(28));
        assert_eq!(resolve_month_day(MonthDay::SecondToLast, 2024, 2), Some(28));
        assert_eq!(resolve_month_day(MonthDay::SecondToLast, 2023, 2), Some(27));
    }

    #[test]
    fn fixed_day_past_month_end_does_not_resolve() {
        assert_eq!(resolve_month_day(MonthDay::Day(31), 2024, 4), None);
        assert_eq!(resolve_month_day(MonthDay::Day(30), 2024, 2), None);
        assert_eq!(resolve_month_day(MonthDay::Day(30), 2024, 3), Some(30));
    }

    #[test]
    fn yearly_step_keeps_month_and_day() {
        assert_eq!(step(&Rule::Yearly, ymd(2024, 2, 15)), Some(ymd(2025, 2, 15)));
    }

    #[test]
    fn yearly_step_rolls_leap_day_into_march() {
        assert_eq!(step(&Rule::Yearly, ymd(2024, 2, 29)), Some(ymd(2025, 3, 1)));
        assert_eq!(step(&Rule::Yearly, ymd(2025, 3, 1)), Some(ymd(2026, 3, 1)));
    }

    #[test]
    fn daily_step_crosses_month_and_year() {
        let rule = Rule::Daily { interval: 3 };
        assert_eq!(step(&rule, ymd(2024, 2, 28)), Some(ymd(2024, 3, 2)));
        assert_eq!(step(&rule, ymd(2023, 12, 30)), Some(ymd(2024, 1, 2)));
    }

    #[test]
    fn filtered_rules_step_one_day() {
        let weekly = Rule::Weekly {
            days: BTreeSet::from([1]),
        };
        assert_eq!(step(&weekly, ymd(2024, 12, 31)), Some(ymd(2025, 1, 1)));
    }

    #[test]
    fn step_past_calendar_range_is_none() {
        assert_eq!(step(&Rule::Daily { interval: 1 }, NaiveDate::MAX), None);
        assert_eq!(step(&Rule::Yearly, NaiveDate::MAX), None);
    }

    #[test]
    fn step_never_leaves_four_digit_years() {
        let last = ymd(9999, 12, 31);
        assert_eq!(step(&Rule::Daily { interval: 1 }, last), None);
        assert_eq!(step(&Rule::Yearly, ymd(9999, 1, 1)), None);
        assert_eq!(
            step(&Rule::Weekly { days: std::collections::BTreeSet::from([1]) }, last),
            None
        );
        assert_eq!(step(&Rule::Daily { interval: 400 }, ymd(9999, 1, 1)), None);
        assert_eq!(step(&Rule::Daily { interval: 1 }, ymd(9999, 12, 30)), Some(last));
    }

    #[test]
    fn weekly_sunday_is_seven() {
        let sunday_only = Rule::Weekly {
            days: BTreeSet::from([7]),
        };
        // 2024-03-03 is a Sunday
        assert!(qualifies(&sunday_only, ymd(2024, 3, 3)));
        assert!(!qualifies(&sunday_only, ymd(2024, 3, 4)));
    }

    #[test]
    fn monthly_qualification_checks_day_and_month() {
        let rule = Rule::Monthly {
            days: BTreeSet::from([MonthDay::Day(1), MonthDay::Last]),
            months: Some(BTreeSet::from([2])),
        };
        assert!(qualifies(&rule, ymd(2024, 2, 1)));
        assert!(qualifies(&rule, ymd(2024, 2, 29)));
        assert!(!qualifies(&rule, ymd(2024, 2, 28)));
        assert!(!qualifies(&rule, ymd(2024, 3, 1)));
    }

    #[test]
    fn monthly_without_months_matches_every_month() {
        let rule = Rule::Monthly {
            days: BTreeSet::from([MonthDay::SecondToLast]),
            months: None,
        };
        assert!(qualifies(&rule, ymd(2024, 4, 29)));
        assert!(qualifies(&rule, ymd(2023, 2, 27)));
        assert!(!qualifies(&rule, ymd(2024, 4, 30)));
    }
}
