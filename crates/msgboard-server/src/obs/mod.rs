//! Lightweight in-process metrics (dependency-free).
//!
//! Metrics are stored as atomics behind `DashMap` cells, created lazily on
//! first observation, and rendered by the `/metrics` handler in Prometheus
//! text format. No external metrics crate is used. The registry is built once
//! at startup and injected through `AppState`; nothing here is global.

pub mod metrics;
pub mod track;
