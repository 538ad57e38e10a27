//! Task use cases over a [`TaskStore`].

use chrono::NaiveDate;

use tickler_db::db::TaskStore;
use tickler_db::model::task::{NewTask, Task, TaskFilter};
use tickler_rule::{RuleError, correct_date, format_date, next_date};

use crate::error::{ServiceError, ServiceResult};
use crate::task::input::{TaskInput, TaskView, parse_id};

/// Maximum number of tasks returned by one listing.
pub const TASK_LIST_LIMIT: i64 = 50;

const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// Validated task fields with the date already corrected.
struct Prepared {
    date: String,
    title: String,
    comment: String,
    repeat: String,
}

fn prepare(input: &TaskInput, today: NaiveDate) -> ServiceResult<Prepared> {
    if input.title.trim().is_empty() {
        return Err(ServiceError::ValidationError("task title is required"));
    }

    tickler_rule::parse(&input.repeat).map_err(RuleError::from)?;
    let date = correct_date(Some(&input.date), &input.repeat, today)?;

    Ok(Prepared {
        date,
        title: input.title.clone(),
        comment: input.comment.clone(),
        repeat: input.repeat.clone(),
    })
}

/// ## Summary
/// Validates and stores a new task, returning its id.
///
/// ## Errors
/// Returns a validation error for a missing title, a rule error for a
/// malformed date or repeat rule, and propagates storage failures.
#[tracing::instrument(skip(store, input), fields(title = %input.title))]
pub async fn add_task(
    store: &dyn TaskStore,
    input: &TaskInput,
    today: NaiveDate,
) -> ServiceResult<i64> {
    let prepared = prepare(input, today)?;
    let new = NewTask {
        date: prepared.date,
        title: prepared.title,
        comment: prepared.comment,
        repeat: prepared.repeat,
    };
    let id = store.create(&new).await?;
    tracing::info!(id, date = %new.date, "Task created");
    Ok(id)
}

/// ## Summary
/// Replaces a stored task with the submitted fields.
///
/// ## Errors
/// Returns a validation error when the id or title is missing,
/// [`ServiceError::InvalidId`] for a non-numeric id, and
/// [`ServiceError::NotFound`] when no task has the id.
#[tracing::instrument(skip(store, input), fields(id = ?input.id))]
pub async fn update_task(
    store: &dyn TaskStore,
    input: &TaskInput,
    today: NaiveDate,
) -> ServiceResult<()> {
    let id = parse_id(input.id.as_deref().unwrap_or_default())?;
    let prepared = prepare(input, today)?;
    let task = Task {
        id,
        date: prepared.date,
        title: prepared.title,
        comment: prepared.comment,
        repeat: prepared.repeat,
    };
    store.update(&task).await?;
    tracing::info!(id, date = %task.date, "Task updated");
    Ok(())
}

/// ## Errors
/// Returns [`ServiceError::InvalidId`] or [`ServiceError::NotFound`].
#[tracing::instrument(skip(store))]
pub async fn get_task(store: &dyn TaskStore, id: &str) -> ServiceResult<TaskView> {
    let id = parse_id(id)?;
    Ok(store.get(id).await?.into())
}

/// ## Errors
/// Returns [`ServiceError::InvalidId`] or [`ServiceError::NotFound`].
#[tracing::instrument(skip(store))]
pub async fn delete_task(store: &dyn TaskStore, id: &str) -> ServiceResult<()> {
    let id = parse_id(id)?;
    store.delete(id).await?;
    tracing::info!(id, "Task deleted");
    Ok(())
}

/// ## Summary
/// Turns free-form search text into a listing filter.
///
/// Text shaped like `DD.MM.YYYY` that names a real day selects that date;
/// any other non-blank text is a substring search.
#[must_use]
pub fn search_filter(search: &str) -> TaskFilter {
    let search = search.trim();
    if search.is_empty() {
        return TaskFilter::All;
    }
    match search_date(search) {
        Some(date) => TaskFilter::Date(format_date(date)),
        None => TaskFilter::Text(search.to_string()),
    }
}

fn search_date(search: &str) -> Option<NaiveDate> {
    let bytes = search.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[2] == b'.'
        && bytes[5] == b'.'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(search, SEARCH_DATE_FORMAT).ok()
}

/// ## Summary
/// Lists at most `limit` tasks matching `search`, earliest date first.
///
/// ## Errors
/// Propagates storage failures.
#[tracing::instrument(skip(store))]
pub async fn list_tasks(
    store: &dyn TaskStore,
    search: &str,
    limit: i64,
) -> ServiceResult<Vec<TaskView>> {
    let filter = search_filter(search);
    let tasks = store.list(limit, &filter).await?;
    tracing::debug!(count = tasks.len(), ?filter, "Listed tasks");
    Ok(tasks.into_iter().map(TaskView::from).collect())
}

/// ## Summary
/// Completes a task. A one-off task is deleted; a recurring task moves to
/// its next occurrence after `today`.
///
/// ## Errors
/// Returns [`ServiceError::InvalidId`] or [`ServiceError::NotFound`] for a
/// bad id, and a rule error if the stored rule or date no longer parses.
#[tracing::instrument(skip(store))]
pub async fn mark_done(store: &dyn TaskStore, id: &str, today: NaiveDate) -> ServiceResult<()> {
    let id = parse_id(id)?;
    let task = store.get(id).await?;

    match next_date(today, &task.date, &task.repeat)? {
        None => {
            store.delete(id).await?;
            tracing::info!(id, "One-off task completed and removed");
        }
        Some(next) => {
            store.update_date(id, &next).await?;
            tracing::info!(id, next = %next, "Recurring task rescheduled");
        }
    }
    Ok(())
}
