//! Conversation runtime for function-calling agents
//!
//! This crate provides the [`AgentExecutor`], which drives the loop between a
//! chat model and a tool registry, and the bounded [`History`] it keeps across
//! turns.

pub mod error;
pub mod executor;
pub mod history;

// Re-export key types
pub use error::{Result, RuntimeError};
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig};
pub use history::History;
