//! Shared application state for the msgboard server.
//!
//! The metrics registry is constructed once here and injected everywhere it
//! is needed; handlers never reach for globals. The lifecycle manager and the
//! store are built from the validated config.

use std::sync::Arc;

use msgboard_core::error::Result;

use crate::config::ServerConfig;
use crate::db::Database;
use crate::obs::metrics::BoardMetrics;
use crate::store::MessageStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    metrics: Arc<BoardMetrics>,
    db: Database,
    store: MessageStore,
}

impl AppState {
    pub fn new(cfg: ServerConfig) -> Self {
        let metrics = Arc::new(BoardMetrics::default());
        let db = Database::new(cfg.database.url.clone(), Arc::clone(&metrics));
        let store = MessageStore::new(cfg.database.content_column);

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                metrics,
                db,
                store,
            }),
        }
    }

    /// Create the messages table idempotently.
    pub async fn ensure_schema(&self) -> Result<()> {
        self.inner
            .db
            .ensure_schema(self.inner.cfg.database.content_column)
            .await
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &BoardMetrics {
        &self.inner.metrics
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn store(&self) -> &MessageStore {
        &self.inner.store
    }
}
