mod app_specific;
mod nextdate;
mod task;
mod tasks;

use salvo::Router;

use tickler_core::constants::API_ROUTE_COMPONENT;

/// ## Summary
/// Constructs the API router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(nextdate::routes())
        .push(task::routes())
        .push(tasks::routes())
}
