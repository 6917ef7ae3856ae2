use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{DietStore, MemoryStore, PgStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DietStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Connects to Postgres and applies migrations. A failed migration is
    /// logged and startup continues.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pg = PgStore::connect(&config).await?;
        if let Err(e) = pg.migrate().await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        Ok(Self {
            store: Arc::new(pg) as Arc<dyn DietStore>,
            config,
        })
    }

    pub fn from_parts(store: Arc<dyn DietStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    pub fn in_memory() -> Self {
        Self::from_parts(
            Arc::new(MemoryStore::new()) as Arc<dyn DietStore>,
            Arc::new(AppConfig::local()),
        )
    }
}
