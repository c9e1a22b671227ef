//! Shared building blocks for the agenda crates: logging setup, startup
//! environment checks, wire types and process metrics.

pub mod types;
pub mod utils;
pub mod env;
pub mod metrics;
