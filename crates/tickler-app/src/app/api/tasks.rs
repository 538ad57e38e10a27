use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Serialize;

use tickler_core::constants::TASKS_ROUTE_COMPONENT;
use tickler_service::task::{self as task_service, TASK_LIST_LIMIT, TaskView};

use crate::error::AppError;
use crate::store_handler::get_store_from_depot;

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<TaskView>,
}

/// ## Summary
/// GET /api/tasks?search= - Lists upcoming tasks, earliest first.
///
/// `search` may be free text or a `DD.MM.YYYY` date.
#[handler]
async fn list_tasks(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let search = req.query::<String>("search").unwrap_or_default();
    let result = async {
        let store = get_store_from_depot(depot)?;
        Ok::<_, AppError>(
            task_service::list_tasks(store.as_ref(), &search, TASK_LIST_LIMIT).await?,
        )
    }
    .await;

    match result {
        Ok(tasks) => res.render(Json(TasksResponse { tasks })),
        Err(e) => e.render_json(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(TASKS_ROUTE_COMPONENT).get(list_tasks)
}
