//! Configuration for the stock agent

use crate::api::TwelveDataConfig;
use crate::error::{Result, StockError};
use agent_runtime::history::DEFAULT_HISTORY_MAX;

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default tool call limit per question
pub const DEFAULT_MAX_TOOL_STEPS: usize = 10;

/// Configuration for the stock agent
#[derive(Debug, Clone)]
pub struct StockAgentConfig {
    /// Chat model to use
    pub model: String,

    /// Messages remembered between questions
    pub history_max: usize,

    /// Tool calls allowed while answering one question
    pub max_tool_steps: usize,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Market data client settings
    pub twelve_data: TwelveDataConfig,
}

impl Default for StockAgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            history_max: DEFAULT_HISTORY_MAX,
            max_tool_steps: DEFAULT_MAX_TOOL_STEPS,
            max_tokens: 1024,
            twelve_data: TwelveDataConfig::default(),
        }
    }
}

impl StockAgentConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockAgentConfigBuilder {
        StockAgentConfigBuilder::default()
    }

    /// Load configuration from the environment
    ///
    /// Reads `TWELVE_API_KEY` (required), `TWELVE_API_BASE`, `OPENAI_MODEL`,
    /// `STOCK_AGENT_HISTORY_MAX` and `STOCK_AGENT_MAX_TOOL_STEPS`.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            model: agent_utils::env_or("OPENAI_MODEL", DEFAULT_MODEL),
            history_max: agent_utils::parse_env("STOCK_AGENT_HISTORY_MAX")?
                .unwrap_or(DEFAULT_HISTORY_MAX),
            max_tool_steps: agent_utils::parse_env("STOCK_AGENT_MAX_TOOL_STEPS")?
                .unwrap_or(DEFAULT_MAX_TOOL_STEPS),
            twelve_data: TwelveDataConfig::from_env()?,
            ..Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(StockError::ConfigError("model must not be empty".to_string()));
        }

        if self.history_max == 0 {
            return Err(StockError::ConfigError(
                "history_max must be greater than 0".to_string(),
            ));
        }

        if self.max_tool_steps == 0 {
            return Err(StockError::ConfigError(
                "max_tool_steps must be greater than 0".to_string(),
            ));
        }

        if self.twelve_data.api_key.trim().is_empty() {
            return Err(StockError::ConfigError(
                "Twelve Data API key required".to_string(),
            ));
        }

        if self.twelve_data.exchanges.is_empty() {
            return Err(StockError::ConfigError(
                "at least one exchange must be allowed".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for StockAgentConfig
#[derive(Debug, Default)]
pub struct StockAgentConfigBuilder {
    model: Option<String>,
    history_max: Option<usize>,
    max_tool_steps: Option<usize>,
    max_tokens: Option<usize>,
    twelve_data: Option<TwelveDataConfig>,
}

impl StockAgentConfigBuilder {
    /// Set the chat model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the number of messages remembered between questions
    pub fn history_max(mut self, history_max: usize) -> Self {
        self.history_max = Some(history_max);
        self
    }

    /// Set the tool call limit per question
    pub fn max_tool_steps(mut self, steps: usize) -> Self {
        self.max_tool_steps = Some(steps);
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the market data client settings
    pub fn twelve_data(mut self, config: TwelveDataConfig) -> Self {
        self.twelve_data = Some(config);
        self
    }

    /// Set only the Twelve Data API key, keeping the other defaults
    pub fn twelve_api_key(mut self, api_key: impl Into<String>) -> Self {
        let mut config = self.twelve_data.take().unwrap_or_default();
        config.api_key = api_key.into();
        self.twelve_data = Some(config);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockAgentConfig> {
        let defaults = StockAgentConfig::default();

        let config = StockAgentConfig {
            model: self.model.unwrap_or(defaults.model),
            history_max: self.history_max.unwrap_or(defaults.history_max),
            max_tool_steps: self.max_tool_steps.unwrap_or(defaults.max_tool_steps),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            twelve_data: self.twelve_data.unwrap_or(defaults.twelve_data),
        };

        config.validate()?;
        Ok(config)
    }
}
