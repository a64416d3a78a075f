//! Connection lifecycle manager.
//!
//! Each request that touches the database opens exactly one fresh connection
//! and drops it before the response is produced. No pooling, no reuse, no
//! retry. The live-connection gauge is paired with the connection's lifetime
//! through the `DbConn` guard: `acquire` increments it, `Drop` decrements it,
//! so a release cannot be skipped on any exit path.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use sqlx::{Connection, SqliteConnection};

use msgboard_core::error::{BoardError, Result};

use crate::config::ContentColumn;
use crate::obs::metrics::BoardMetrics;

pub struct Database {
    url: String,
    metrics: Arc<BoardMetrics>,
}

impl Database {
    pub fn new(url: String, metrics: Arc<BoardMetrics>) -> Self {
        Self { url, metrics }
    }

    /// Open a fresh connection. Failure is a typed error, not a panic
    /// condition; callers answer with a service-unavailable response.
    pub async fn acquire(&self) -> Result<DbConn> {
        let conn = SqliteConnection::connect(&self.url).await.map_err(|e| {
            tracing::error!(error = %e, "database connection error");
            BoardError::Connection(e.to_string())
        })?;
        self.metrics.db_connections.inc();
        Ok(DbConn {
            conn,
            metrics: Arc::clone(&self.metrics),
        })
    }

    /// Create the messages table if it does not exist. Runs once at startup;
    /// the column name comes from the closed `ContentColumn` enum, never from
    /// free-form input.
    pub async fn ensure_schema(&self, column: ContentColumn) -> Result<()> {
        let mut conn = self.acquire().await?;
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS messages (\
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             {} TEXT NOT NULL, \
             created_at TEXT NOT NULL)",
            column.as_str()
        );
        sqlx::query(&ddl)
            .execute(&mut *conn)
            .await
            .map_err(|e| BoardError::Query(e.to_string()))?;
        Ok(())
    }
}

/// A live connection paired with the gauge. Dereferences to the underlying
/// `SqliteConnection` for query execution.
pub struct DbConn {
    conn: SqliteConnection,
    metrics: Arc<BoardMetrics>,
}

impl std::fmt::Debug for DbConn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConn").finish_non_exhaustive()
    }
}

impl Drop for DbConn {
    fn drop(&mut self) {
        self.metrics.db_connections.dec();
    }
}

impl Deref for DbConn {
    type Target = SqliteConnection;
    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}
