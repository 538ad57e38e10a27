//! Recurrence rule mini-language.
//!
//! Rules are space-separated tokens:
//!
//! ```text
//! ""                      no recurrence
//! "y"                     yearly
//! "d <1-400>"             every N days
//! "w <d1,d2,...>"         weekly, 1 = Monday .. 7 = Sunday
//! "m <d1,...> [mo1,...]"  monthly, days in -2, -1, 1..31; months in 1..12
//! ```
//!
//! Tokens after the last one a kind consumes are ignored.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{ParseError, ParseResult};

const WEEKDAYS: RangeInclusive<i64> = 1..=7;
const MONTHS: RangeInclusive<i64> = 1..=12;
/// Intervals accepted by a `d` rule.
const DAILY_INTERVAL: RangeInclusive<i64> = 1..=400;

/// A parsed recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Same month and day every year.
    Yearly,
    /// Every `interval` days.
    Daily { interval: u32 },
    /// Listed weekdays, numbered Monday = 1 .. Sunday = 7.
    Weekly { days: BTreeSet<u32> },
    /// Listed days of the month, optionally only in the listed months (1..12).
    Monthly {
        days: BTreeSet<MonthDay>,
        months: Option<BTreeSet<u32>>,
    },
}

/// A day position inside a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MonthDay {
    /// A fixed day number, 1..31.
    Day(u32),
    /// The last day of the month (`-1`).
    Last,
    /// The day before the last day of the month (`-2`).
    SecondToLast,
}

impl MonthDay {
    /// Returns the numeric form used in rule text.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Day(day) => i64::from(day),
            Self::Last => -1,
            Self::SecondToLast => -2,
        }
    }
}

impl Rule {
    /// Single-letter kind token of the rule.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Yearly => "y",
            Self::Daily { .. } => "d",
            Self::Weekly { .. } => "w",
            Self::Monthly { .. } => "m",
        }
    }

    /// ## Summary
    /// Checks every numeric field against the ranges the rule text allows.
    ///
    /// Rules built by [`parse`] always pass; rules assembled by hand are
    /// checked again before a search runs.
    ///
    /// ## Errors
    /// Returns `MissingParameter` for an empty day or month set and
    /// `OutOfRange` for the first value outside its range.
    pub fn validate(&self) -> ParseResult<()> {
        match self {
            Self::Yearly => Ok(()),
            Self::Daily { interval } => check_range(i64::from(*interval), &DAILY_INTERVAL),
            Self::Weekly { days } => check_set(self.kind(), days, &WEEKDAYS),
            Self::Monthly { days, months } => {
                if days.is_empty() {
                    return Err(ParseError::missing_parameter(self.kind()));
                }
                for day in days {
                    if let MonthDay::Day(n) = day
                        && !(1..=31).contains(n)
                    {
                        return Err(ParseError::out_of_range(n.to_string()));
                    }
                }
                match months {
                    Some(months) => check_set(self.kind(), months, &MONTHS),
                    None => Ok(()),
                }
            }
        }
    }
}

fn check_range(value: i64, range: &RangeInclusive<i64>) -> ParseResult<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ParseError::out_of_range(value.to_string()))
    }
}

fn check_set(kind: &str, values: &BTreeSet<u32>, range: &RangeInclusive<i64>) -> ParseResult<()> {
    if values.is_empty() {
        return Err(ParseError::missing_parameter(kind));
    }
    values
        .iter()
        .try_for_each(|value| check_range(i64::from(*value), range))
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yearly => write!(f, "y"),
            Self::Daily { interval } => write!(f, "d {interval}"),
            Self::Weekly { days } => write!(f, "w {}", join(days.iter().map(|d| i64::from(*d)))),
            Self::Monthly { days, months } => {
                write!(f, "m {}", join(days.iter().map(|d| d.as_i64())))?;
                if let Some(months) = months {
                    write!(f, " {}", join(months.iter().map(|m| i64::from(*m))))?;
                }
                Ok(())
            }
        }
    }
}

fn join(values: impl Iterator<Item = i64>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

/// Parses rule text.
///
/// Blank text yields `Ok(None)`: the task does not repeat. That is not an
/// error, and callers must keep it apart from one.
///
/// Tokens are separated by exactly one space. Leading, doubled or
/// tab separators leave an empty or malformed token that is rejected.
///
/// ## Errors
/// Returns a [`ParseError`] naming the first token that was rejected. An
/// unknown kind is rejected before any later token is looked at, and a list
/// with one bad element rejects the whole rule.
#[tracing::instrument(level = "trace")]
pub fn parse(text: &str) -> ParseResult<Option<Rule>> {
    let mut tokens = text.split(' ');

    let Some(kind) = tokens.next().filter(|_| !text.trim().is_empty()) else {
        tracing::trace!("Blank rule, no recurrence");
        return Ok(None);
    };

    let rule = match kind {
        "y" => Rule::Yearly,
        "d" => {
            let token = required(kind, tokens.next())?;
            Rule::Daily {
                interval: parse_bounded(token, &DAILY_INTERVAL)?,
            }
        }
        "w" => {
            let token = required(kind, tokens.next())?;
            Rule::Weekly {
                days: parse_list(token, &WEEKDAYS)?,
            }
        }
        "m" => {
            let token = required(kind, tokens.next())?;
            let days = token
                .split(',')
                .map(parse_month_day)
                .collect::<ParseResult<BTreeSet<_>>>()?;
            let months = tokens
                .next()
                .map(|token| parse_list(token, &MONTHS))
                .transpose()?;
            Rule::Monthly { days, months }
        }
        other => return Err(ParseError::unknown_kind(other)),
    };

    tracing::trace!(rule = %rule, "Parsed rule");
    Ok(Some(rule))
}

fn required<'a>(kind: &str, token: Option<&'a str>) -> ParseResult<&'a str> {
    token.ok_or_else(|| ParseError::missing_parameter(kind))
}

fn parse_number(token: &str) -> ParseResult<i64> {
    token
        .parse()
        .map_err(|_err| ParseError::not_a_number(token))
}

fn parse_bounded(token: &str, range: &RangeInclusive<i64>) -> ParseResult<u32> {
    let value = parse_number(token)?;
    if !range.contains(&value) {
        return Err(ParseError::out_of_range(token));
    }
    u32::try_from(value).map_err(|_err| ParseError::out_of_range(token))
}

/// Parses a comma-separated list of bounded integers.
fn parse_list(token: &str, range: &RangeInclusive<i64>) -> ParseResult<BTreeSet<u32>> {
    token
        .split(',')
        .map(|item| parse_bounded(item, range))
        .collect()
}

fn parse_month_day(token: &str) -> ParseResult<MonthDay> {
    match parse_number(token)? {
        -1 => Ok(MonthDay::Last),
        -2 => Ok(MonthDay::SecondToLast),
        value @ 1..=31 => u32::try_from(value)
            .map(MonthDay::Day)
            .map_err(|_err| ParseError::out_of_range(token)),
        _ => Err(ParseError::out_of_range(token)),
    }
}
