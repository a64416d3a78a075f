//! Message store accessor.
//!
//! The three persistence operations over the messages table. All statements
//! bind user content as parameters; the only interpolated identifier is the
//! validated column name from config. Content round-trips verbatim: any
//! HTML-escaping happens at render time, not here.

use chrono::{DateTime, Utc};
use sqlx::Row;

use msgboard_core::error::{BoardError, Result};
use msgboard_core::Message;

use crate::config::ContentColumn;
use crate::db::DbConn;

pub struct MessageStore {
    column: ContentColumn,
}

impl MessageStore {
    pub fn new(column: ContentColumn) -> Self {
        Self { column }
    }

    /// All messages, newest first (`ORDER BY id DESC`). The caller is
    /// expected to set the message-count gauge to `len` right after.
    pub async fn list_all(&self, conn: &mut DbConn) -> Result<Vec<Message>> {
        let sql = format!(
            "SELECT id, {} AS content, created_at FROM messages ORDER BY id DESC",
            self.column.as_str()
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&mut **conn)
            .await
            .map_err(query_err)?;

        rows.into_iter()
            .map(|row| {
                Ok(Message {
                    id: row.try_get("id").map_err(query_err)?,
                    content: row.try_get("content").map_err(query_err)?,
                    created_at: row
                        .try_get::<DateTime<Utc>, _>("created_at")
                        .map_err(query_err)?,
                })
            })
            .collect()
    }

    /// Insert one message with the current timestamp. Empty content is a
    /// silent no-op, not an error; there is no further validation.
    pub async fn insert(&self, conn: &mut DbConn, content: &str) -> Result<()> {
        if !Message::content_present(content) {
            return Ok(());
        }
        let sql = format!(
            "INSERT INTO messages ({}, created_at) VALUES (?, ?)",
            self.column.as_str()
        );
        sqlx::query(&sql)
            .bind(content)
            .bind(Utc::now())
            .execute(&mut **conn)
            .await
            .map_err(query_err)?;
        Ok(())
    }

    /// Delete by id. Matching zero rows is success; delete is idempotent.
    pub async fn delete(&self, conn: &mut DbConn, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(&mut **conn)
            .await
            .map_err(query_err)?;
        Ok(())
    }
}

fn query_err(e: sqlx::Error) -> BoardError {
    BoardError::Query(e.to_string())
}
