//! Error types for the conversation runtime

use agent_llm::LLMError;
use agent_tools::ToolError;
use thiserror::Error;

/// Result type alias for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors that abort a conversation turn
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The chat model call failed
    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    /// A tool rejected its arguments or its backing service failed
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// The model kept asking for tools past the configured limit
    #[error("Too many tool steps: the model requested more than {limit} tool calls in one turn")]
    TooManyToolSteps {
        /// Configured maximum
        limit: usize,
    },

    /// The executor was built with an invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}
