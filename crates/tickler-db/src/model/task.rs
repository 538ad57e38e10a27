use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// A stored task. `date` is canonical `YYYYMMDD` text and `repeat` is rule
/// text (empty for a one-off task).
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, AsChangeset)]
#[diesel(table_name = schema::task)]
#[diesel(check_for_backend(Pg))]
pub struct Task {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = schema::task)]
pub struct NewTask {
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl NewTask {
    /// Attaches an id, producing the stored form.
    #[must_use]
    pub fn with_id(self, id: i64) -> Task {
        Task {
            id,
            date: self.date,
            title: self.title,
            comment: self.comment,
            repeat: self.repeat,
        }
    }
}

/// Narrows a task listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    /// Case-insensitive substring of the title or the comment.
    Text(String),
    /// Exact canonical date.
    Date(String),
}

impl TaskFilter {
    /// Returns `true` if `task` passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Date(date) => task.date == *date,
            Self::Text(text) => {
                let needle = text.to_lowercase();
                task.title.to_lowercase().contains(&needle)
                    || task.comment.to_lowercase().contains(&needle)
            }
        }
    }
}
