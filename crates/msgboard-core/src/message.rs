//! The `Message` entity: one stored note.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single message row. `id` is assigned by the store on insert and
/// `created_at` is set by the store at insert time; neither is mutable
/// afterwards. Handlers only ever hold transient, request-scoped copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Presence check applied at the handler boundary before an insert is
    /// attempted. Whitespace-only content counts as present; there is no
    /// further validation.
    pub fn content_present(content: &str) -> bool {
        !content.is_empty()
    }
}
