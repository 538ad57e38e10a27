//! Finding the first occurrence strictly after a reference day.

use chrono::NaiveDate;

use crate::advance::{qualifies, step};
use crate::date::{format_date, is_representable, parse_date};
use crate::error::{RuleError, RuleResult};
use crate::rule::{Rule, parse};

/// Days a monthly search may scan before giving up.
///
/// Day and month filters can be jointly unsatisfiable (`m 31 2`), so the
/// monthly scan is the only one that needs a cap.
pub const MONTHLY_SEARCH_LIMIT: u32 = 800;

/// Every weekday shows up within this many consecutive days.
const WEEKLY_SEARCH_LIMIT: u32 = 7;

/// ## Summary
/// Returns the first occurrence of `rule` that falls strictly after `now`.
///
/// - Yearly and daily rules step from `anchor` (at least once) until the
///   date passes `now`.
/// - Weekly rules walk day by day from `anchor` and stop on the first
///   listed weekday after `now`.
/// - Monthly rules start at `max(anchor, now + 1)` and walk day by day for
///   at most [`MONTHLY_SEARCH_LIMIT`] days.
///
/// ## Errors
/// Returns [`RuleError::Parse`] for a rule whose fields are out of range,
/// [`RuleError::SearchExhausted`] when a monthly rule finds nothing within
/// the limit, and [`RuleError::DateOverflow`] when the next occurrence would
/// fall after 9999-12-31.
#[tracing::instrument(level = "debug", skip_all, fields(rule = %rule, %anchor, %now))]
pub fn search(rule: &Rule, anchor: NaiveDate, now: NaiveDate) -> RuleResult<NaiveDate> {
    rule.validate()?;

    let found = match rule {
        Rule::Yearly | Rule::Daily { .. } => step_past(rule, anchor, now),
        Rule::Weekly { .. } => scan_weekly(rule, anchor, now),
        Rule::Monthly { .. } => scan_monthly(rule, anchor, now),
    }?;
    if !is_representable(found) {
        return Err(RuleError::DateOverflow);
    }

    tracing::debug!(next = %found, "Found next occurrence");
    Ok(found)
}

/// Each step strictly increases the date, so this runs at most
/// `(now - anchor) / step + 1` times.
fn step_past(rule: &Rule, anchor: NaiveDate, now: NaiveDate) -> RuleResult<NaiveDate> {
    let mut date = anchor;
    loop {
        date = step(rule, date).ok_or(RuleError::DateOverflow)?;
        if date > now {
            return Ok(date);
        }
    }
}

fn scan_weekly(rule: &Rule, anchor: NaiveDate, now: NaiveDate) -> RuleResult<NaiveDate> {
    // Candidates on or before `now` never count, so skip straight past them.
    let mut date = anchor.max(now);
    for _ in 0..WEEKLY_SEARCH_LIMIT {
        date = step(rule, date).ok_or(RuleError::DateOverflow)?;
        if qualifies(rule, date) {
            return Ok(date);
        }
    }
    Err(RuleError::SearchExhausted {
        limit: WEEKLY_SEARCH_LIMIT,
    })
}

fn scan_monthly(rule: &Rule, anchor: NaiveDate, now: NaiveDate) -> RuleResult<NaiveDate> {
    let mut date = if now >= anchor {
        now.succ_opt().ok_or(RuleError::DateOverflow)?
    } else {
        anchor
    };

    for _ in 0..MONTHLY_SEARCH_LIMIT {
        if qualifies(rule, date) && date > now {
            return Ok(date);
        }
        date = step(rule, date).ok_or(RuleError::DateOverflow)?;
    }

    tracing::debug!(rule = %rule, limit = MONTHLY_SEARCH_LIMIT, "Monthly search exhausted");
    Err(RuleError::SearchExhausted {
        limit: MONTHLY_SEARCH_LIMIT,
    })
}

/// ## Summary
/// Computes the next date for a rule given as text, anchored at a date given
/// as text, relative to `now`. The result is canonical `YYYYMMDD` text.
///
/// A blank rule returns `Ok(None)` without looking at the anchor. Otherwise
/// the anchor is parsed first, then the rule, then the search runs.
///
/// ## Errors
/// Returns [`RuleError::InvalidDateFormat`] for a malformed anchor,
/// [`RuleError::Parse`] for malformed rule text, and any error of [`search`].
pub fn next_date(now: NaiveDate, anchor: &str, rule: &str) -> RuleResult<Option<String>> {
    if rule.trim().is_empty() {
        return Ok(None);
    }

    let anchor = parse_date(anchor)?;
    let Some(rule) = parse(rule)? else {
        return Ok(None);
    };

    search(&rule, anchor, now).map(|date| Some(format_date(date)))
}
