//! Wire shapes for tasks. Ids travel as decimal strings.

use serde::{Deserialize, Serialize};

use tickler_db::model::task::Task;

use crate::error::{ServiceError, ServiceResult};

/// A task as submitted by a client. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskInput {
    pub id: Option<String>,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

/// A stored task as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub id: String,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            date: task.date,
            title: task.title,
            comment: task.comment,
            repeat: task.repeat,
        }
    }
}

/// ## Summary
/// Parses a task id received as text.
///
/// ## Errors
/// Returns [`ServiceError::ValidationError`] for an empty id and
/// [`ServiceError::InvalidId`] for anything that is not a decimal integer.
pub fn parse_id(text: &str) -> ServiceResult<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ServiceError::ValidationError("task id is required"));
    }
    text.parse::<i64>()
        .map_err(|_err| ServiceError::InvalidId(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_decimal_text() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
    }

    #[test]
    fn parse_id_rejects_empty_and_garbage() {
        assert!(matches!(parse_id(""), Err(ServiceError::ValidationError(_))));
        assert!(matches!(parse_id("abc"), Err(ServiceError::InvalidId(id)) if id == "abc"));
        assert!(matches!(parse_id("1.5"), Err(ServiceError::InvalidId(_))));
    }

    #[test]
    fn input_fields_default_to_empty() {
        let input: TaskInput = serde_json::from_str(r#"{"title":"Read"}"#).unwrap();
        assert_eq!(input.title, "Read");
        assert!(input.id.is_none());
        assert!(input.date.is_empty());
        assert!(input.repeat.is_empty());
    }

    #[test]
    fn view_renders_id_as_string() {
        let view = TaskView::from(Task {
            id: 12,
            date: "20240101".to_string(),
            title: "t".to_string(),
            comment: String::new(),
            repeat: "y".to_string(),
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], "12");
        assert_eq!(json["repeat"], "y");
    }
}
