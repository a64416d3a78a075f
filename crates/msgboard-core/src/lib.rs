//! msgboard core: transport-agnostic domain types and error surface.
//!
//! This crate defines the `Message` entity and the unified error type shared
//! by the server and tooling. It intentionally carries no HTTP or database
//! dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `BoardError`/`Result` so production
//! processes do not crash on malformed input or a dead database.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod message;

/// Shared result type.
pub use error::{BoardError, Result};
pub use message::Message;
