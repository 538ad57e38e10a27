use salvo::async_trait;
use std::sync::Arc;

use tickler_core::config::DatabaseConfig;
use tickler_core::error::CoreError;
use tickler_db::db::TaskStore;
use tickler_db::db::connection::create_pool;
use tickler_db::db::memory::MemoryTaskStore;
use tickler_db::db::migrate::run_migrations;

use crate::error::AppResult;

pub struct StoreHandler {
    pub store: Arc<dyn TaskStore>,
}

#[async_trait]
impl salvo::Handler for StoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.store));
    }
}

/// ## Summary
/// Retrieves the task store from the depot.
///
/// ## Errors
/// Returns an error if the task store is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn TaskStore>> {
    depot
        .obtain::<Arc<dyn TaskStore>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Task store not found in depot").into())
}

/// ## Summary
/// Opens the task store selected by `database.url`.
///
/// `memory://` selects the in-process store; anything else is a Postgres URL
/// whose migrations are applied before the pool is built.
///
/// ## Errors
/// Returns an error if migrations fail or the pool cannot be created.
pub async fn open_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn TaskStore>> {
    if config.is_memory() {
        tracing::warn!("Using in-memory task store; tasks are lost on restart");
        return Ok(Arc::new(MemoryTaskStore::new()));
    }

    run_migrations(&config.url).await?;
    let pool = create_pool(&config.url, u32::from(config.max_connections)).await?;
    Ok(Arc::new(pool))
}
