//! Axum router wiring.
//!
//! Three board routes plus `/health` and `/metrics`. The metrics recorder
//! wraps everything, the fallback included, so unmatched paths are still
//! counted (under `endpoint="unknown"`).

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, handlers, obs, ops};

// The route table. `Endpoint::from_route` matches on these same constants,
// so editing a pattern here cannot silently degrade its label to `unknown`.
pub const ROUTE_INDEX: &str = "/";
pub const ROUTE_ADD: &str = "/add";
pub const ROUTE_DELETE: &str = "/delete/:id";
pub const ROUTE_HEALTH: &str = "/health";
pub const ROUTE_METRICS: &str = "/metrics";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(ROUTE_INDEX, get(handlers::index))
        .route(ROUTE_ADD, post(handlers::add_message))
        .route(ROUTE_DELETE, get(handlers::delete_message))
        .route(ROUTE_HEALTH, get(ops::health))
        .route(ROUTE_METRICS, get(ops::metrics))
        .fallback(ops::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), obs::track::record))
        .with_state(state)
}
