//! Recurrence rules for tickler tasks.
//!
//! A task carries an anchor date in `YYYYMMDD` form and an optional rule
//! written in a small mini-language (`y`, `d 7`, `w 1,5`, `m -1 1,7`).
//! This crate parses those rules, steps dates forward under them, finds the
//! first occurrence strictly after a reference day, and decides which date a
//! stored task should carry once its own date has slipped into the past.
//!
//! Everything here is pure: no I/O, no shared state, day granularity only.

pub mod advance;
pub mod correct;
pub mod date;
pub mod error;
pub mod rule;
pub mod search;

pub use correct::correct_date;
pub use date::{format_date, parse_date};
pub use error::{ParseError, ParseErrorKind, RuleError, RuleResult};
pub use rule::{MonthDay, Rule, parse};
pub use search::{MONTHLY_SEARCH_LIMIT, next_date, search};
