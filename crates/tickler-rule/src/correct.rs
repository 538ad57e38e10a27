//! Correcting a stored task date that has fallen behind the current day.

use chrono::NaiveDate;

use crate::date::{format_date, parse_date};
use crate::error::RuleResult;
use crate::search::next_date;

/// ## Summary
/// Decides which date a task should carry before it is persisted.
///
/// - No date: today.
/// - A date on or after today: unchanged.
/// - A date before today without a rule: today.
/// - A date before today with a rule: the rule's next occurrence after today.
///
/// ## Errors
/// Returns [`crate::RuleError::InvalidDateFormat`] for malformed date text and
/// propagates rule parse and search errors unchanged.
#[tracing::instrument(level = "debug", skip(now), fields(%now))]
pub fn correct_date(task_date: Option<&str>, task_rule: &str, now: NaiveDate) -> RuleResult<String> {
    let Some(text) = task_date.filter(|text| !text.is_empty()) else {
        return Ok(format_date(now));
    };

    let date = parse_date(text)?;
    if date >= now {
        return Ok(text.to_string());
    }

    let corrected = next_date(now, text, task_rule)?.unwrap_or_else(|| format_date(now));
    tracing::debug!(from = %text, to = %corrected, "Corrected past task date");
    Ok(corrected)
}
