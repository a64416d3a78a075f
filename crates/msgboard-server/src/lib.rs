//! msgboard server library entry.
//!
//! This crate wires the config loader, the connection lifecycle manager, the
//! message store, the request-metrics recorder, and the route handlers into a
//! cohesive HTTP service. It is intended to be consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod db;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod render;
pub mod router;
pub mod store;
