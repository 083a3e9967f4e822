//! Error types for stock agent operations

use thiserror::Error;

/// Stock agent specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// The market data API answered with an error
    #[error("API error: {0}")]
    ApiError(String),

    /// The market data API answered with a body we do not understand
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Missing or malformed environment configuration
    #[error("Configuration error: {0}")]
    EnvError(#[from] agent_utils::ConfigError),

    /// Configuration values that fail validation
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Language model provider error
    #[error("LLM error: {0}")]
    LlmError(#[from] agent_llm::LLMError),

    /// Conversation turn failed
    #[error(transparent)]
    RuntimeError(#[from] agent_runtime::RuntimeError),
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

#[cfg(test)]
mod tests {
    use super::*;
    use agent_runtime::RuntimeError;

    #[test]
    fn test_error_display() {
        let err = StockError::ApiError("**symbol** not found: XYZ".to_string());
        assert_eq!(err.to_string(), "API error: **symbol** not found: XYZ");

        let err: StockError = agent_utils::ConfigError::MissingVar("TWELVE_API_KEY".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: TWELVE_API_KEY environment variable not set"
        );
    }

    #[test]
    fn test_runtime_error_is_transparent() {
        let err: StockError = RuntimeError::TooManyToolSteps { limit: 10 }.into();
        assert!(err.to_string().starts_with("Too many tool steps"));
    }
}
