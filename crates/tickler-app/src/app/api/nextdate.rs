//! `GET /api/nextdate`: evaluates a rule without touching storage.

use chrono::NaiveDate;
use salvo::writing::Text;
use salvo::{Request, Response, Router, handler};

use tickler_core::constants::NEXTDATE_ROUTE_COMPONENT;
use tickler_rule::{next_date, parse_date};

use crate::app::today;
use crate::error::{AppError, AppResult};

/// ## Summary
/// Responds with the next occurrence as plain `YYYYMMDD` text.
///
/// Query parameters: `now` (optional, defaults to today), `date` (the anchor)
/// and `repeat` (the rule).
///
/// ## Errors
/// Responds 400 with a plain text reason for a malformed date or rule, a
/// missing anchor, or an empty rule.
#[handler]
async fn get_next_date(req: &mut Request, res: &mut Response) {
    let now = req.query::<String>("now");
    let date = req.query::<String>("date").unwrap_or_default();
    let repeat = req.query::<String>("repeat").unwrap_or_default();

    match compute(now.as_deref(), &date, &repeat, today()) {
        Ok(next) => res.render(Text::Plain(next)),
        Err(e) => e.render_text(res),
    }
}

fn compute(now: Option<&str>, date: &str, repeat: &str, today: NaiveDate) -> AppResult<String> {
    let now = match now.filter(|text| !text.is_empty()) {
        Some(text) => parse_date(text)?,
        None => today,
    };
    if date.is_empty() {
        return Err(AppError::BadRequest("date is required".to_string()));
    }

    next_date(now, date, repeat)?
        .ok_or_else(|| AppError::BadRequest("repeat rule is empty".to_string()))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(NEXTDATE_ROUTE_COMPONENT).get(get_next_date)
}
