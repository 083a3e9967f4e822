//! Stock question answering agent

use agent_llm::providers::OpenAIProvider;
use agent_llm::LLMProvider;
use agent_runtime::{AgentExecutor, History};
use agent_tools::ToolRegistry;
use std::sync::Arc;
use tracing::info;

use crate::api::TwelveDataClient;
use crate::config::StockAgentConfig;
use crate::error::Result;
use crate::prompts::SYSTEM_PROMPT;
use crate::tools::{GetQuoteTool, LookupTickerTool};

/// Answers questions about stocks, remembering the recent conversation
///
/// The model can look up ticker symbols and fetch quotes. One agent is one
/// conversation; create another agent for an independent one.
pub struct StockAgent {
    executor: AgentExecutor,
}

impl StockAgent {
    /// Create an agent talking to `provider`
    pub fn new(provider: Arc<dyn LLMProvider>, config: StockAgentConfig) -> Result<Self> {
        config.validate()?;

        let client = Arc::new(TwelveDataClient::new(config.twelve_data.clone())?);
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(LookupTickerTool::new(Arc::clone(&client))))
            .with_tool(Arc::new(GetQuoteTool::new(client)));

        info!(
            provider = provider.name(),
            model = %config.model,
            tools = ?registry.names(),
            history_max = config.history_max,
            "Creating stock agent"
        );

        let executor = AgentExecutor::builder()
            .provider(provider)
            .tool_registry(Arc::new(registry))
            .model(config.model)
            .system_prompt(SYSTEM_PROMPT)
            .max_tokens(config.max_tokens)
            .temperature(0.0)
            .history_max(config.history_max)
            .max_tool_steps(config.max_tool_steps)
            .build()?;

        Ok(Self { executor })
    }

    /// Create an agent using OpenAI, configured from the environment
    ///
    /// Needs `OPENAI_API_KEY` and `TWELVE_API_KEY`; see
    /// [`StockAgentConfig::from_env`] for the optional settings.
    pub fn from_env() -> Result<Self> {
        let provider = OpenAIProvider::from_env()?;
        let config = StockAgentConfig::from_env()?;
        Self::new(Arc::new(provider), config)
    }

    /// Answer a question, taking the earlier conversation into account
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        Ok(self.executor.ask(question).await?)
    }

    /// Messages remembered from earlier questions
    pub fn history(&self) -> &History {
        self.executor.history()
    }

    /// Start a fresh conversation
    pub fn clear_history(&mut self) {
        self.executor.clear_history();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StockError;
    use crate::api::TwelveDataConfig;
    use agent_llm::Message;
    use agent_llm::providers::MockProvider;

    fn config() -> StockAgentConfig {
        StockAgentConfig::builder()
            .twelve_data(TwelveDataConfig::new("test-key").with_api_base("http://127.0.0.1:9"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let provider = Arc::new(MockProvider::default());
        let result = StockAgent::new(provider, StockAgentConfig::default());
        assert!(matches!(result, Err(StockError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_request_advertises_both_tools() {
        let provider = Arc::new(MockProvider::with_messages(vec![Message::assistant(
            "I only answer questions about stocks.",
        )]));
        let mut agent = StockAgent::new(provider.clone(), config()).unwrap();

        let answer = agent.ask("What's the weather?").await.unwrap();
        assert_eq!(answer, "I only answer questions about stocks.");

        let requests = provider.requests().await;
        let request = &requests[0];
        assert_eq!(request.model, "gpt-3.5-turbo");
        assert_eq!(request.system.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(request.temperature, Some(0.0));

        let tools = request.tools.as_deref().unwrap();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["lookup_ticker", "get_quote"]);
        assert_eq!(tools[0].required_parameters(), vec!["company"]);
        assert_eq!(tools[1].required_parameters(), vec!["ticker"]);
    }

    #[tokio::test]
    async fn test_clear_history() {
        let provider = Arc::new(MockProvider::with_messages(vec![Message::assistant("Hello")]));
        let mut agent = StockAgent::new(provider, config()).unwrap();

        agent.ask("Hi").await.unwrap();
        assert_eq!(agent.history().len(), 2);

        agent.clear_history();
        assert!(agent.history().is_empty());
    }
}
