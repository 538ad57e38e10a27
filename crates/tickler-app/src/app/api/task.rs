//! Single-task endpoints under `/api/task`.

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Serialize;
use serde_json::json;

use tickler_core::constants::{DONE_ROUTE_COMPONENT, TASK_ROUTE_COMPONENT};
use tickler_service::task::{self as task_service, TaskInput};

use crate::app::today;
use crate::error::{AppError, AppResult};
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Created task response payload
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

async fn parse_input(req: &mut Request) -> AppResult<TaskInput> {
    req.parse_json::<TaskInput>().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to parse task body");
        AppError::BadRequest(format!("invalid request body: {e}"))
    })
}

fn query_id(req: &Request) -> String {
    req.query::<String>("id").unwrap_or_default()
}

/// ## Summary
/// POST /api/task - Creates a task and responds 201 with its id.
#[handler]
async fn create_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let input = parse_input(req).await?;
        let store = get_store_from_depot(depot)?;
        Ok::<_, AppError>(task_service::add_task(store.as_ref(), &input, today()).await?)
    }
    .await;

    match result {
        Ok(id) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(CreatedResponse { id: id.to_string() }));
        }
        Err(e) => e.render_json(res),
    }
}

/// ## Summary
/// GET /api/task?id= - Responds with one task.
#[handler]
async fn get_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = query_id(req);
    let result = async {
        let store = get_store_from_depot(depot)?;
        Ok::<_, AppError>(task_service::get_task(store.as_ref(), &id).await?)
    }
    .await;

    match result {
        Ok(view) => res.render(Json(view)),
        Err(e) => e.render_json(res),
    }
}

/// ## Summary
/// PUT /api/task - Replaces a task; the body must carry its id.
#[handler]
async fn update_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let input = parse_input(req).await?;
        let store = get_store_from_depot(depot)?;
        Ok::<_, AppError>(task_service::update_task(store.as_ref(), &input, today()).await?)
    }
    .await;

    match result {
        Ok(()) => res.render(Json(json!({}))),
        Err(e) => e.render_json(res),
    }
}

/// ## Summary
/// DELETE /api/task?id= - Removes a task.
#[handler]
async fn delete_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = query_id(req);
    let result = async {
        let store = get_store_from_depot(depot)?;
        Ok::<_, AppError>(task_service::delete_task(store.as_ref(), &id).await?)
    }
    .await;

    match result {
        Ok(()) => res.render(Json(json!({}))),
        Err(e) => e.render_json(res),
    }
}

/// ## Summary
/// POST /api/task/done?id= - Completes a task: one-off tasks are removed,
/// recurring tasks move to their next occurrence.
#[handler]
async fn mark_done(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = query_id(req);
    let result = async {
        let store = get_store_from_depot(depot)?;
        Ok::<_, AppError>(task_service::mark_done(store.as_ref(), &id, today()).await?)
    }
    .await;

    match result {
        Ok(()) => res.render(Json(json!({}))),
        Err(e) => e.render_json(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(TASK_ROUTE_COMPONENT)
        .get(get_task)
        .post(create_task)
        .put(update_task)
        .delete(delete_task)
        .push(Router::with_path(DONE_ROUTE_COMPONENT).post(mark_done))
}
