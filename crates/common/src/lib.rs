//! Shared building blocks for the blog workspace: logging setup, startup
//! environment checks and small response types used across crates.

pub mod types;
pub mod utils;
pub mod env;
