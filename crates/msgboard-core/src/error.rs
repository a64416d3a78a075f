//! Shared error type across msgboard crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Could not reach or authenticate to the database.
    DbUnavailable,
    /// A database statement failed after a connection was established.
    DbQuery,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::DbUnavailable => "DB_UNAVAILABLE",
            ClientCode::DbQuery => "DB_QUERY",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BoardError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database connection failed: {0}")]
    Connection(String),
    #[error("database query failed: {0}")]
    Query(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl BoardError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            BoardError::BadRequest(_) => ClientCode::BadRequest,
            BoardError::Connection(_) => ClientCode::DbUnavailable,
            BoardError::Query(_) => ClientCode::DbQuery,
            BoardError::Internal(_) => ClientCode::Internal,
        }
    }

    /// HTTP status the error surfaces as. Database failures are answered
    /// with 500 and never retried; the user may resubmit.
    pub fn http_status(&self) -> u16 {
        match self {
            BoardError::BadRequest(_) => 400,
            BoardError::Connection(_) | BoardError::Query(_) | BoardError::Internal(_) => 500,
        }
    }
}
