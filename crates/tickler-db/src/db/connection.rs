use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::db::query::task as task_query;
use crate::db::{StoreFuture, TaskStore};
use crate::model::task::{NewTask, Task, TaskFilter};

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection<'pool> = PooledConnection<'pool, AsyncPgConnection>;

/// ## Summary
/// Creates a new database connection pool.
///
/// ## Errors
/// Returns an error if the pool cannot be created with the provided database URL.
#[tracing::instrument(skip(database_url), fields(pool_size = size))]
pub async fn create_pool(database_url: &str, size: u32) -> anyhow::Result<DbPool> {
    tracing::debug!("Creating database connection pool");

    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

    let pool = Pool::builder()
        .max_size(size)
        .min_idle(Some(1))
        .test_on_check_out(true)
        .build(config)
        .await?;

    tracing::info!(pool_size = size, "Database connection pool created");

    Ok(pool)
}

impl TaskStore for DbPool {
    fn create<'a>(&'a self, task: &'a NewTask) -> StoreFuture<'a, i64> {
        Box::pin(async move {
            let mut conn = self.get().await?;
            task_query::create(&mut conn, task).await
        })
    }

    fn get(&self, id: i64) -> StoreFuture<'_, Task> {
        Box::pin(async move {
            let mut conn = self.get().await?;
            task_query::get(&mut conn, id).await
        })
    }

    fn update<'a>(&'a self, task: &'a Task) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut conn = self.get().await?;
            task_query::update(&mut conn, task).await
        })
    }

    fn update_date<'a>(&'a self, id: i64, date: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut conn = self.get().await?;
            task_query::update_date(&mut conn, id, date).await
        })
    }

    fn delete(&self, id: i64) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut conn = self.get().await?;
            task_query::delete(&mut conn, id).await
        })
    }

    fn list<'a>(&'a self, limit: i64, filter: &'a TaskFilter) -> StoreFuture<'a, Vec<Task>> {
        Box::pin(async move {
            let mut conn = self.get().await?;
            task_query::list(&mut conn, limit, filter).await
        })
    }
}
