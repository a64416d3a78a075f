//! Request metrics recorder.
//!
//! One middleware wraps every route, `/metrics` included: the scrape endpoint
//! is just another route and counting it is a harmless feedback loop. The
//! pre-hook captures a start instant before dispatch; the post-hook observes
//! latency and bumps the request counter from the final status, then returns
//! the response unmodified. Both hooks are infallible: metrics are never
//! load-bearing for request correctness.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;
use crate::obs::metrics::Endpoint;

pub async fn record(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    // Label by the matched route pattern, never the raw path. Requests that
    // matched no route resolve to "unknown".
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| Endpoint::from_route(p.as_str()))
        .unwrap_or(Endpoint::Unknown);

    let res = next.run(req).await;

    let metrics = state.metrics();
    metrics.request_latency.observe(endpoint, started.elapsed());
    metrics
        .request_count
        .inc(&method, endpoint, res.status().as_u16());
    res
}
