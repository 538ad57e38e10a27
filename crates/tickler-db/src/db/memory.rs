//! In-process task store.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::db::{StoreFuture, TaskStore};
use crate::error::DbError;
use crate::model::task::{NewTask, Task, TaskFilter};

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    tasks: BTreeMap<i64, Task>,
}

/// Task store held in memory. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    state: RwLock<State>,
}

impl MemoryTaskStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for MemoryTaskStore {
    fn create<'a>(&'a self, task: &'a NewTask) -> StoreFuture<'a, i64> {
        Box::pin(async move {
            let mut state = self.state.write().await;
            state.last_id += 1;
            let id = state.last_id;
            state.tasks.insert(id, task.clone().with_id(id));
            tracing::debug!(id, "Inserted task");
            Ok(id)
        })
    }

    fn get(&self, id: i64) -> StoreFuture<'_, Task> {
        Box::pin(async move {
            self.state
                .read()
                .await
                .tasks
                .get(&id)
                .cloned()
                .ok_or(DbError::NotFound(id))
        })
    }

    fn update<'a>(&'a self, task: &'a Task) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut state = self.state.write().await;
            let stored = state
                .tasks
                .get_mut(&task.id)
                .ok_or(DbError::NotFound(task.id))?;
            stored.clone_from(task);
            Ok(())
        })
    }

    fn update_date<'a>(&'a self, id: i64, date: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut state = self.state.write().await;
            let stored = state.tasks.get_mut(&id).ok_or(DbError::NotFound(id))?;
            date.clone_into(&mut stored.date);
            Ok(())
        })
    }

    fn delete(&self, id: i64) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.state
                .write()
                .await
                .tasks
                .remove(&id)
                .map(|_| ())
                .ok_or(DbError::NotFound(id))
        })
    }

    fn list<'a>(&'a self, limit: i64, filter: &'a TaskFilter) -> StoreFuture<'a, Vec<Task>> {
        Box::pin(async move {
            let state = self.state.read().await;
            let mut tasks: Vec<Task> = state
                .tasks
                .values()
                .filter(|task| filter.matches(task))
                .cloned()
                .collect();
            tasks.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
            tasks.truncate(usize::try_from(limit).unwrap_or(0));
            Ok(tasks)
        })
    }
}
