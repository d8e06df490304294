//! Module declaration and lifecycle

use crate::config::Config;
use crate::domain::Service;
use crate::infra::storage::SeaOrmStore;
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Purchases service module
///
/// Lifecycle: [`init`](Self::init), optionally [`migrate`](Self::migrate),
/// then [`register_rest`](Self::register_rest) on the host router.
pub struct PurchasesServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for PurchasesServiceModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl PurchasesServiceModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire the store and domain service on top of a database connection
    pub fn init(&self, cfg: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        if cfg.default_page_size == 0 || cfg.default_page_size > cfg.max_page_size {
            anyhow::bail!(
                "default_page_size must be between 1 and max_page_size ({})",
                cfg.max_page_size
            );
        }
        *self.config.write() = cfg;

        let store = Arc::new(SeaOrmStore::new(db));
        let service = Arc::new(Service::new(store));
        *self.service.write() = Some(service);

        tracing::info!("Purchases service initialized");
        Ok(())
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Purchases service migrations completed");
        Ok(())
    }

    /// Domain service, once initialized
    pub fn service(&self) -> Option<Arc<Service>> {
        self.service.read().clone()
    }

    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self
            .service
            .read()
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?
            .clone();
        let config = self.config.read().clone();

        tracing::info!("Registering purchases service REST routes");
        crate::api::rest::routes::register_routes(router, service, config)
    }
}
