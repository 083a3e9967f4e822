//! Shared utilities for the stock agent workspace
//!
//! Logging setup and environment-backed configuration helpers used by the
//! provider, runtime and stock crates.

pub mod config;
pub mod logging;

pub use config::{ConfigError, env_or, parse_env, require_env};
pub use logging::{init_tracing, init_tracing_with};
