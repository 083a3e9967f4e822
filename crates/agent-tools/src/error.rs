//! Error types for tool execution

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised while decoding arguments for or running a tool
#[derive(Error, Debug)]
pub enum ToolError {
    /// The model supplied arguments that do not match the tool's schema
    #[error("Invalid parameters for {tool}: {reason}")]
    InvalidParameters {
        /// Tool name
        tool: String,
        /// What was wrong with the arguments
        reason: String,
    },

    /// The tool ran but its backing service failed
    #[error("Tool {tool} failed: {reason}")]
    ExecutionFailed {
        /// Tool name
        tool: String,
        /// Underlying failure
        reason: String,
    },
}

impl ToolError {
    /// Build an `ExecutionFailed` error from any displayable cause
    pub fn execution(tool: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::ExecutionFailed {
            tool: tool.into(),
            reason: cause.to_string(),
        }
    }
}
