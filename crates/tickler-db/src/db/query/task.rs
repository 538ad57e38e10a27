//! Task queries.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::PgTextExpressionMethods;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::task;
use crate::error::{DbError, DbResult};
use crate::model::task::{NewTask, Task, TaskFilter};

/// ## Summary
/// Returns a query to select all tasks.
#[must_use]
pub fn all() -> task::BoxedQuery<'static, Pg> {
    task::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a task by ID.
#[must_use]
pub fn by_id(id: i64) -> task::BoxedQuery<'static, Pg> {
    all().filter(task::id.eq(id))
}

/// ## Summary
/// Returns a query narrowed by `filter`, ordered by date then id.
#[must_use]
pub fn filtered(filter: &TaskFilter) -> task::BoxedQuery<'_, Pg> {
    let query: task::BoxedQuery<'_, Pg> = match filter {
        TaskFilter::All => all(),
        TaskFilter::Date(date) => all().filter(task::date.eq(date.as_str())),
        TaskFilter::Text(text) => {
            let pattern = format!("%{}%", escape_like_pattern(text));
            all().filter(
                task::title
                    .ilike(pattern.clone())
                    .or(task::comment.ilike(pattern)),
            )
        }
    };
    query.order((task::date.asc(), task::id.asc()))
}

/// ## Summary
/// Escapes `%`, `_`, and `\` so they match literally in a LIKE pattern.
#[must_use]
pub fn escape_like_pattern(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// ## Errors
/// Returns an error if the insert fails.
#[tracing::instrument(skip(conn, new))]
pub async fn create(conn: &mut DbConnection<'_>, new: &NewTask) -> DbResult<i64> {
    let id = diesel::insert_into(task::table)
        .values(new)
        .returning(task::id)
        .get_result::<i64>(conn)
        .await?;
    tracing::debug!(id, "Inserted task");
    Ok(id)
}

/// ## Errors
/// Returns [`DbError::NotFound`] if the task does not exist.
#[tracing::instrument(skip(conn))]
pub async fn get(conn: &mut DbConnection<'_>, id: i64) -> DbResult<Task> {
    by_id(id)
        .select(Task::as_select())
        .first(conn)
        .await
        .optional()?
        .ok_or(DbError::NotFound(id))
}

/// ## Errors
/// Returns [`DbError::NotFound`] if no row was updated.
#[tracing::instrument(skip(conn, updated), fields(id = updated.id))]
pub async fn update(conn: &mut DbConnection<'_>, updated: &Task) -> DbResult<()> {
    let rows = diesel::update(task::table.find(updated.id))
        .set(updated)
        .execute(conn)
        .await?;
    expect_one(rows, updated.id)
}

/// ## Errors
/// Returns [`DbError::NotFound`] if no row was updated.
#[tracing::instrument(skip(conn))]
pub async fn update_date(conn: &mut DbConnection<'_>, id: i64, date: &str) -> DbResult<()> {
    let rows = diesel::update(task::table.find(id))
        .set(task::date.eq(date))
        .execute(conn)
        .await?;
    expect_one(rows, id)
}

/// ## Errors
/// Returns [`DbError::NotFound`] if no row was deleted.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: i64) -> DbResult<()> {
    let rows = diesel::delete(task::table.find(id)).execute(conn).await?;
    expect_one(rows, id)
}

/// ## Errors
/// Returns an error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list(
    conn: &mut DbConnection<'_>,
    limit: i64,
    filter: &TaskFilter,
) -> DbResult<Vec<Task>> {
    let tasks = filtered(filter)
        .limit(limit)
        .select(Task::as_select())
        .load(conn)
        .await?;
    Ok(tasks)
}

fn expect_one(rows: usize, id: i64) -> DbResult<()> {
    if rows == 0 {
        Err(DbError::NotFound(id))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use diesel::query_builder::QueryFragment;

    use super::*;

    fn sql_of<Q: QueryFragment<Pg>>(query: &Q) -> String {
        diesel::debug_query::<Pg, _>(query).to_string()
    }

    #[test]
    fn escape_like_pattern_escapes_wildcards() {
        assert_eq!(escape_like_pattern("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }

    #[test]
    fn text_filter_searches_title_and_comment() {
        let filter = TaskFilter::Text("gym".to_string());
        let sql = sql_of(&filtered(&filter));
        assert!(sql.contains("ILIKE"), "{sql}");
        assert!(sql.contains("\"title\""), "{sql}");
        assert!(sql.contains("\"comment\""), "{sql}");
        assert!(sql.contains("%gym%"), "{sql}");
    }

    #[test]
    fn listing_is_ordered_by_date_then_id() {
        let sql = sql_of(&filtered(&TaskFilter::All));
        assert!(sql.contains("ORDER BY"), "{sql}");
        let date_at = sql.find("\"task\".\"date\" ASC");
        let id_at = sql.find("\"task\".\"id\" ASC");
        assert!(date_at.is_some() && id_at.is_some(), "{sql}");
        assert!(date_at < id_at, "{sql}");
    }

    #[test]
    fn date_filter_binds_exact_date() {
        let filter = TaskFilter::Date("20240101".to_string());
        let sql = sql_of(&filtered(&filter));
        assert!(sql.contains("\"task\".\"date\" = $1"), "{sql}");
        assert!(sql.contains("20240101"), "{sql}");
    }
}
