//! Top-level facade crate for msgboard.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use msgboard_core::*;
}

pub mod server {
    pub use msgboard_server::*;
}
