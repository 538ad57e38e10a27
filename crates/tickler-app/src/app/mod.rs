pub mod api;

use std::sync::Arc;

use salvo::Router;
use salvo::logging::Logger;
use salvo::serve_static::StaticDir;

use tickler_core::config::Settings;
use tickler_db::db::TaskStore;

use crate::store_handler::StoreHandler;

/// ## Summary
/// Builds the full router: request logging, store injection, the API and a
/// static file fallback rooted at `web.dir`.
#[must_use]
pub fn router(settings: &Settings, store: Arc<dyn TaskStore>) -> Router {
    Router::new()
        .hoop(Logger::new())
        .hoop(StoreHandler { store })
        .push(api::routes())
        .push(
            Router::with_path("{**path}").get(
                StaticDir::new([settings.web.dir.clone()])
                    .defaults("index.html")
                    .auto_list(false),
            ),
        )
}

/// The current local calendar day.
#[must_use]
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
