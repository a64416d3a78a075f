//! Board route handlers.
//!
//! Each route is a single stateless transaction: acquire a connection,
//! delegate to the store, let the guard release the connection, respond.
//! A failed acquire is answered with a plain 500; it is logged and never
//! retried.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use msgboard_core::error::BoardError;
use msgboard_core::Message;

use crate::app_state::AppState;
use crate::render;

#[derive(Debug, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub message: String,
}

/// `GET /` — list all messages, newest first, and refresh the message-count
/// gauge from the result.
pub async fn index(State(state): State<AppState>) -> Response {
    let mut conn = match state.db().acquire().await {
        Ok(c) => c,
        Err(e) => return connection_failed(e),
    };
    match state.store().list_all(&mut conn).await {
        Ok(messages) => {
            state.metrics().total_messages.set(messages.len() as i64);
            Html(render::index_page(&messages)).into_response()
        }
        Err(e) => query_failed(e),
    }
}

/// `POST /add` — insert the submitted message when present, then redirect
/// back to the board regardless. An empty field is silently ignored and
/// never opens a connection.
pub async fn add_message(State(state): State<AppState>, Form(form): Form<AddForm>) -> Response {
    if Message::content_present(&form.message) {
        let mut conn = match state.db().acquire().await {
            Ok(c) => c,
            Err(e) => return connection_failed(e),
        };
        if let Err(e) = state.store().insert(&mut conn, &form.message).await {
            return query_failed(e);
        }
    }
    redirect_home()
}

/// `GET /delete/:id` — delete by id and redirect back. A nonexistent id is a
/// no-op, not an error.
pub async fn delete_message(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let mut conn = match state.db().acquire().await {
        Ok(c) => c,
        Err(e) => return connection_failed(e),
    };
    if let Err(e) = state.store().delete(&mut conn, id).await {
        return query_failed(e);
    }
    redirect_home()
}

fn connection_failed(e: BoardError) -> Response {
    tracing::error!(error = %e, code = e.client_code().as_str(), "database unavailable");
    (StatusCode::INTERNAL_SERVER_ERROR, "Database connection failed").into_response()
}

fn query_failed(e: BoardError) -> Response {
    tracing::error!(error = %e, code = e.client_code().as_str(), "database query failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
}

/// Plain 302 Found back to the board.
fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}
