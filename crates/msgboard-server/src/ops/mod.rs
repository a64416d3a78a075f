//! Operational HTTP endpoints.
//!
//! - `/health`  : liveness, no database touch
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;

/// Fixed healthy status. The body shape is part of the public surface and
/// asserted byte-for-byte by deployment checks, so it is formatted by hand
/// rather than through a serializer that reorders keys.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = format!(
        "{{\"status\": \"healthy\", \"service\": \"{}\"}}",
        state.cfg().server.service_name
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}

/// Fallback for unmatched paths; counted under the `unknown` endpoint label.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
}
