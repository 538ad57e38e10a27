use std::future::Future;
use std::pin::Pin;

use crate::error::DbResult;
use crate::model::task::{NewTask, Task, TaskFilter};

pub mod connection;
pub mod memory;
pub mod migrate;
pub mod query;
pub mod schema;

/// Boxed future returned by [`TaskStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = DbResult<T>> + Send + 'a>>;

/// Persistent task storage.
///
/// Listings are ordered by date ascending, then by id.
pub trait TaskStore: Send + Sync {
    /// Inserts a task and returns its assigned id.
    ///
    /// ## Errors
    /// Returns an error if the store rejects the insert.
    fn create<'a>(&'a self, task: &'a NewTask) -> StoreFuture<'a, i64>;

    /// ## Errors
    /// Returns [`crate::error::DbError::NotFound`] if no task has `id`.
    fn get(&self, id: i64) -> StoreFuture<'_, Task>;

    /// Replaces every field of the task with `task.id`.
    ///
    /// ## Errors
    /// Returns [`crate::error::DbError::NotFound`] if the task does not exist.
    fn update<'a>(&'a self, task: &'a Task) -> StoreFuture<'a, ()>;

    /// ## Errors
    /// Returns [`crate::error::DbError::NotFound`] if the task does not exist.
    fn update_date<'a>(&'a self, id: i64, date: &'a str) -> StoreFuture<'a, ()>;

    /// ## Errors
    /// Returns [`crate::error::DbError::NotFound`] if the task does not exist.
    fn delete(&self, id: i64) -> StoreFuture<'_, ()>;

    /// ## Errors
    /// Returns an error if the store cannot be queried.
    fn list<'a>(&'a self, limit: i64, filter: &'a TaskFilter) -> StoreFuture<'a, Vec<Task>>;
}
