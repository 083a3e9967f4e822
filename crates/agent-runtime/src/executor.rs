//! Agent executor for running the function-calling loop
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Append the user message to the history
//! 2. Call the LLM with the system prompt, history and available tools
//! 3. If a tool was requested, run it, record call and result, and loop back
//! 4. If the model answered, record the answer, trim the history and return

use crate::{History, Result, RuntimeError};
use agent_llm::{CompletionRequest, CompletionResponse, LLMProvider, Message, ToolDefinition};
use agent_tools::{ToolError, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Answer substituted when the model provider reports it is overloaded
pub const DEFAULT_OVERLOADED_MESSAGE: &str =
    "I'm very sorry, but the language model is overloaded at the moment. Please ask again.";

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: Option<f32>,

    /// Messages kept in history between turns
    pub history_max: usize,

    /// Tool calls allowed within a single turn
    pub max_tool_steps: usize,

    /// Answer used when the provider is temporarily unavailable
    pub overloaded_message: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: None,
            max_tokens: 1024,
            temperature: Some(0.0),
            history_max: crate::history::DEFAULT_HISTORY_MAX,
            max_tool_steps: 10,
            overloaded_message: DEFAULT_OVERLOADED_MESSAGE.to_string(),
        }
    }
}

/// Executes the agent loop: LLM → tool call → execution → loop back
///
/// The executor owns the conversation history, so one executor is one
/// conversation. Turns run to completion one at a time through `&mut self`.
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    tools: Vec<ToolDefinition>,
    config: ExecutorConfig,
    history: History,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        let tools = build_tool_definitions(&tool_registry);
        let history = History::new(config.history_max);
        Self {
            provider,
            tool_registry,
            tools,
            config,
            history,
        }
    }

    /// Create a builder
    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    /// Get the executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Conversation history retained across turns
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Forget the conversation so far
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Tool definitions advertised to the model, in registration order
    pub fn tool_definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Run one conversation turn for `user_message`
    ///
    /// # Returns
    ///
    /// The model's final answer after all requested tools have run. On error
    /// the history keeps whatever was appended before the failure, minus an
    /// unanswered tool call. It is trimmed to its bound either way.
    pub async fn ask(&mut self, user_message: impl Into<String>) -> Result<String> {
        self.history.push(Message::user(user_message));

        let mut outbound = self.history.messages();
        let result = self.run_tool_loop(&mut outbound).await;

        if let Ok(answer) = &result {
            self.history.push(Message::assistant(answer.clone()));
        }
        self.history.trim();

        debug!(
            history_len = self.history.len(),
            succeeded = result.is_ok(),
            "Turn complete"
        );
        result
    }

    /// Call the model until it answers in text
    ///
    /// Every tool call and its result are appended to both the history and
    /// the in-flight `outbound` list, call first, result right after.
    async fn run_tool_loop(&mut self, outbound: &mut Vec<Message>) -> Result<String> {
        let mut steps = 0;

        loop {
            log_outbound(outbound.last());

            let response = self.call_model(outbound.clone()).await?;

            let (id, name, arguments) = match response.message {
                Message::ToolCall {
                    id,
                    name,
                    arguments,
                } => (id, name, arguments),
                other => {
                    let answer = other.text().unwrap_or_default().to_string();
                    info!(answer = %answer, "<--- Back");
                    return Ok(answer);
                }
            };

            info!(
                "<--- Back {}({})",
                name,
                arguments.replace('\n', "")
            );

            if steps >= self.config.max_tool_steps {
                warn!(
                    max_tool_steps = self.config.max_tool_steps,
                    tool_name = %name,
                    "Tool step limit reached, aborting turn"
                );
                return Err(RuntimeError::TooManyToolSteps {
                    limit: self.config.max_tool_steps,
                });
            }
            steps += 1;

            let call = Message::tool_call(&id, &name, &arguments);
            self.history.push(call.clone());
            outbound.push(call);

            let content = self.dispatch(&name, &arguments).await?;

            let result = Message::tool_result(id, name, content);
            self.history.push(result.clone());
            outbound.push(result);
        }
    }

    /// Send the conversation to the model
    ///
    /// A temporarily unavailable provider yields the configured fallback
    /// answer instead of an error.
    async fn call_model(&self, messages: Vec<Message>) -> Result<CompletionResponse> {
        let mut builder = CompletionRequest::builder(&self.config.model)
            .messages(messages)
            .max_tokens(self.config.max_tokens);

        if let Some(system) = &self.config.system_prompt {
            builder = builder.system(system.clone());
        }
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }
        if !self.tools.is_empty() {
            builder = builder.tools(self.tools.clone());
        }

        debug!(
            model = %self.config.model,
            provider = self.provider.name(),
            tool_count = self.tools.len(),
            "Sending request to LLM"
        );

        match self.provider.complete(builder.build()).await {
            Ok(response) => {
                debug!(
                    stop_reason = ?response.stop_reason,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    total_tokens = response.usage.total(),
                    tool_call = response.is_tool_call(),
                    "LLM response received"
                );
                Ok(response)
            }
            Err(e) if e.is_service_unavailable() => {
                warn!(error = %e, "LLM provider unavailable, answering with fallback");
                Ok(CompletionResponse::synthesized(
                    self.config.overloaded_message.clone(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run the named tool and render its output for the model
    ///
    /// An unknown tool name is not an error: the model gets told so in the
    /// result and can react in its answer.
    async fn dispatch(&self, name: &str, arguments: &str) -> Result<String> {
        let Some(tool) = self.tool_registry.get(name) else {
            warn!(tool_name = %name, "Model requested an unknown tool");
            return Ok(format!("Error: function {name} does not exist"));
        };

        let params: Value =
            serde_json::from_str(arguments).map_err(|e| ToolError::InvalidParameters {
                tool: name.to_string(),
                reason: format!("arguments are not valid JSON: {e}"),
            })?;

        let start_time = std::time::Instant::now();
        let output = tool.execute(params).await?;
        let content = render_output(output);

        info!(
            tool_name = %name,
            duration_ms = start_time.elapsed().as_millis(),
            result_length = content.len(),
            "Tool execution succeeded"
        );

        Ok(content)
    }
}

/// Build tool definitions from the registry
fn build_tool_definitions(registry: &ToolRegistry) -> Vec<ToolDefinition> {
    registry
        .list_tools()
        .iter()
        .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
        .collect()
}

fn render_output(output: Value) -> String {
    match output {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn log_outbound(last: Option<&Message>) {
    match last {
        Some(Message::ToolResult { name, content, .. }) => {
            info!("---> To LLM: {} returned {}", name, content);
        }
        Some(message) => {
            info!("---> To LLM: {}", message.text().unwrap_or_default());
        }
        None => {}
    }
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the number of messages kept between turns
    pub fn history_max(mut self, history_max: usize) -> Self {
        self.config.history_max = history_max;
        self
    }

    /// Set the tool call limit per turn
    pub fn max_tool_steps(mut self, max_tool_steps: usize) -> Self {
        self.config.max_tool_steps = max_tool_steps;
        self
    }

    /// Set the fallback answer used when the provider is overloaded
    pub fn overloaded_message(mut self, message: impl Into<String>) -> Self {
        self.config.overloaded_message = message.into();
        self
    }

    /// Build the executor
    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self
            .provider
            .ok_or_else(|| RuntimeError::Configuration("Provider not set".to_string()))?;

        if self.config.history_max == 0 {
            return Err(RuntimeError::Configuration(
                "history_max must be greater than 0".to_string(),
            ));
        }

        if self.config.max_tool_steps == 0 {
            return Err(RuntimeError::Configuration(
                "max_tool_steps must be greater than 0".to_string(),
            ));
        }

        Ok(AgentExecutor::new(provider, self.tool_registry, self.config))
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_llm::LLMError;
    use agent_llm::providers::MockProvider;
    use agent_tools::{Tool, decode_params};
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct EchoParams {
        text: String,
    }

    /// Echoes its `text` argument back in upper case
    struct ShoutTool;

    #[async_trait]
    impl Tool for ShoutTool {
        async fn execute(&self, params: Value) -> agent_tools::Result<Value> {
            let params: EchoParams = decode_params(self.name(), params)?;
            Ok(json!(params.text.to_uppercase()))
        }

        fn name(&self) -> &str {
            "shout"
        }

        fn description(&self) -> &str {
            "Upper-case some text"
        }

        fn input_schema(&self) -> Value {
            agent_llm::tools::schema::object(
                json!({"text": agent_llm::tools::schema::string("Text to shout")}),
                &["text"],
            )
        }
    }

    /// Returns structured output instead of a string
    struct CountTool;

    #[async_trait]
    impl Tool for CountTool {
        async fn execute(&self, _params: Value) -> agent_tools::Result<Value> {
            Ok(json!({"count": 3}))
        }

        fn name(&self) -> &str {
            "count"
        }

        fn description(&self) -> &str {
            "Count things"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {}, "required": []})
        }
    }

    /// Always fails as if its backing service were down
    struct BrokenTool;

    #[async_trait]
    impl Tool for BrokenTool {
        async fn execute(&self, _params: Value) -> agent_tools::Result<Value> {
            Err(ToolError::execution("broken", "connection refused"))
        }

        fn name(&self) -> &str {
            "broken"
        }

        fn description(&self) -> &str {
            "Never works"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {}, "required": []})
        }
    }

    fn executor(provider: &Arc<MockProvider>) -> AgentExecutor {
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(ShoutTool))
            .with_tool(Arc::new(CountTool))
            .with_tool(Arc::new(BrokenTool));

        AgentExecutor::builder()
            .provider(provider.clone())
            .tool_registry(Arc::new(registry))
            .system_prompt("You shout.")
            .max_tool_steps(3)
            .build()
            .unwrap()
    }

    fn shout_call(id: &str) -> Message {
        Message::tool_call(id, "shout", r#"{"text":"hello"}"#)
    }

    #[test]
    fn test_builder() {
        let builder = AgentExecutorBuilder::new()
            .model("test-model")
            .max_tool_steps(5)
            .history_max(8)
            .system_prompt("Test prompt");

        assert_eq!(builder.config.model, "test-model");
        assert_eq!(builder.config.max_tool_steps, 5);
        assert_eq!(builder.config.history_max, 8);
        assert_eq!(builder.config.system_prompt, Some("Test prompt".to_string()));
    }

    #[test]
    fn test_builder_requires_provider() {
        let result = AgentExecutorBuilder::new().build();
        assert!(matches!(result, Err(RuntimeError::Configuration(_))));
    }

    #[test]
    fn test_builder_rejects_zero_history() {
        let result = AgentExecutorBuilder::new()
            .provider(Arc::new(MockProvider::default()))
            .history_max(0)
            .build();
        assert!(matches!(result, Err(RuntimeError::Configuration(_))));
    }

    #[test]
    fn test_builder_rejects_zero_tool_steps() {
        let result = AgentExecutorBuilder::new()
            .provider(Arc::new(MockProvider::default()))
            .max_tool_steps(0)
            .build();
        assert!(matches!(result, Err(RuntimeError::Configuration(_))));
    }

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.history_max, 16);
        assert_eq!(config.max_tool_steps, 10);
        assert_eq!(config.temperature, Some(0.0));
    }

    #[tokio::test]
    async fn test_direct_answer() {
        let provider = Arc::new(MockProvider::with_messages(vec![Message::assistant("Hi!")]));
        let mut executor = executor(&provider);

        let answer = executor.ask("hello").await.unwrap();

        assert_eq!(answer, "Hi!");
        assert_eq!(
            executor.history().messages(),
            vec![Message::user("hello"), Message::assistant("Hi!")]
        );
    }

    #[tokio::test]
    async fn test_request_carries_system_tools_and_temperature() {
        let provider = Arc::new(MockProvider::with_messages(vec![Message::assistant("Hi!")]));
        let mut executor = executor(&provider);
        executor.ask("hello").await.unwrap();

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.system.as_deref(), Some("You shout."));
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(request.messages, vec![Message::user("hello")]);

        let names: Vec<_> = request
            .tools
            .as_deref()
            .unwrap()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["shout", "count", "broken"]);
    }

    #[tokio::test]
    async fn test_single_tool_call_adds_four_entries() {
        let provider = Arc::new(MockProvider::with_messages(vec![
            shout_call("call_1"),
            Message::assistant("They said HELLO"),
        ]));
        let mut executor = executor(&provider);

        let answer = executor.ask("what did they say?").await.unwrap();

        assert_eq!(answer, "They said HELLO");
        assert_eq!(
            executor.history().messages(),
            vec![
                Message::user("what did they say?"),
                shout_call("call_1"),
                Message::tool_result("call_1", "shout", "HELLO"),
                Message::assistant("They said HELLO"),
            ]
        );

        // Second request carries the call and its result, in order
        let requests = provider.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].messages.len(), 3);
        assert!(requests[1].messages[1].is_tool_call());
        assert!(requests[1].messages[2].is_tool_result());
    }

    #[tokio::test]
    async fn test_structured_output_rendered_as_json() {
        let provider = Arc::new(MockProvider::with_messages(vec![
            Message::tool_call("call_1", "count", "{}"),
            Message::assistant("Three"),
        ]));
        let mut executor = executor(&provider);
        executor.ask("how many?").await.unwrap();

        let messages = executor.history().messages();
        assert_eq!(messages[2], Message::tool_result("call_1", "count", r#"{"count":3}"#));
    }

    #[tokio::test]
    async fn test_chained_tool_calls() {
        let provider = Arc::new(MockProvider::with_messages(vec![
            shout_call("call_1"),
            shout_call("call_2"),
            Message::assistant("done"),
        ]));
        let mut executor = executor(&provider);

        executor.ask("twice").await.unwrap();
        assert_eq!(executor.history().len(), 6);
        assert_eq!(provider.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_tool_keeps_conversation_going() {
        let provider = Arc::new(MockProvider::with_messages(vec![
            Message::tool_call("call_1", "get_weather", r#"{"city":"Paris"}"#),
            Message::assistant("I can only help with shouting."),
        ]));
        let mut executor = executor(&provider);

        let answer = executor.ask("weather?").await.unwrap();

        assert_eq!(answer, "I can only help with shouting.");
        let messages = executor.history().messages();
        assert_eq!(
            messages[2],
            Message::tool_result("call_1", "get_weather", "Error: function get_weather does not exist")
        );
    }

    #[tokio::test]
    async fn test_service_unavailable_falls_back() {
        let provider = Arc::new(MockProvider::new(vec![Err(LLMError::ServiceUnavailable(
            "overloaded".to_string(),
        ))]));
        let mut executor = executor(&provider);

        let answer = executor.ask("hello").await.unwrap();

        assert_eq!(answer, DEFAULT_OVERLOADED_MESSAGE);
        assert_eq!(executor.history().len(), 2);
        assert_eq!(executor.history().last(), Some(&Message::assistant(DEFAULT_OVERLOADED_MESSAGE)));
    }

    #[tokio::test]
    async fn test_other_provider_errors_propagate() {
        let provider = Arc::new(MockProvider::new(vec![Err(LLMError::AuthenticationFailed)]));
        let mut executor = executor(&provider);

        let result = executor.ask("hello").await;

        assert!(matches!(result, Err(RuntimeError::Llm(LLMError::AuthenticationFailed))));
        // The user message stays; nothing is rolled back
        assert_eq!(executor.history().messages(), vec![Message::user("hello")]);
    }

    #[tokio::test]
    async fn test_tool_failure_propagates() {
        let provider = Arc::new(MockProvider::with_messages(vec![
            Message::tool_call("call_1", "broken", "{}"),
            Message::assistant("Second answer"),
        ]));
        let mut executor = executor(&provider);

        let result = executor.ask("first").await;

        assert!(matches!(
            result,
            Err(RuntimeError::Tool(ToolError::ExecutionFailed { .. }))
        ));
        // The unanswered call is not kept
        assert_eq!(executor.history().messages(), vec![Message::user("first")]);

        // The next turn sends a well-formed conversation
        let answer = executor.ask("second").await.unwrap();
        assert_eq!(answer, "Second answer");

        let requests = provider.requests().await;
        assert_eq!(
            requests[1].messages,
            vec![Message::user("first"), Message::user("second")]
        );
    }

    #[tokio::test]
    async fn test_failed_turn_is_trimmed() {
        let provider = Arc::new(MockProvider::with_messages(vec![
            shout_call("call_1"),
            shout_call("call_2"),
        ]));
        let registry = ToolRegistry::new().with_tool(Arc::new(ShoutTool));
        let mut executor = AgentExecutor::builder()
            .provider(provider.clone())
            .tool_registry(Arc::new(registry))
            .history_max(2)
            .max_tool_steps(1)
            .build()
            .unwrap();

        let result = executor.ask("loop").await;

        assert!(matches!(result, Err(RuntimeError::TooManyToolSteps { limit: 1 })));
        assert_eq!(
            executor.history().messages(),
            vec![shout_call("call_1"), Message::tool_result("call_1", "shout", "HELLO")]
        );
    }

    #[tokio::test]
    async fn test_repeated_provider_failures_stay_bounded() {
        let provider = Arc::new(MockProvider::new(
            (0..5).map(|_| Err(LLMError::AuthenticationFailed)).collect(),
        ));
        let mut executor = AgentExecutor::builder()
            .provider(provider)
            .history_max(3)
            .build()
            .unwrap();

        for i in 0..5 {
            assert!(executor.ask(format!("question {i}")).await.is_err());
            assert!(executor.history().len() <= 3);
        }
        assert_eq!(executor.history().last(), Some(&Message::user("question 4")));
    }

    #[tokio::test]
    async fn test_malformed_arguments_fail_the_turn() {
        let provider = Arc::new(MockProvider::with_messages(vec![Message::tool_call(
            "call_1", "shout", "{not json",
        )]));
        let mut executor = executor(&provider);

        let result = executor.ask("shout").await;
        assert!(matches!(
            result,
            Err(RuntimeError::Tool(ToolError::InvalidParameters { .. }))
        ));
        assert!(!executor.history().iter().any(Message::is_tool_call));
    }

    #[tokio::test]
    async fn test_tool_step_limit() {
        let provider = Arc::new(MockProvider::with_messages(vec![
            shout_call("call_1"),
            shout_call("call_2"),
            shout_call("call_3"),
            shout_call("call_4"),
        ]));
        let mut executor = executor(&provider);

        let result = executor.ask("loop forever").await;

        assert!(matches!(result, Err(RuntimeError::TooManyToolSteps { limit: 3 })));
        // user + three complete call/result pairs, no answer
        assert_eq!(executor.history().len(), 7);
        assert!(executor.history().last().is_some_and(Message::is_tool_result));
    }

    #[tokio::test]
    async fn test_history_bounded_across_turns() {
        let mut script = Vec::new();
        for i in 0..6 {
            script.push(shout_call(&format!("call_{i}")));
            script.push(Message::assistant(format!("answer {i}")));
        }
        let provider = Arc::new(MockProvider::with_messages(script));
        let registry = ToolRegistry::new().with_tool(Arc::new(ShoutTool));
        let mut executor = AgentExecutor::builder()
            .provider(provider.clone())
            .tool_registry(Arc::new(registry))
            .history_max(6)
            .build()
            .unwrap();

        for i in 0..6 {
            executor.ask(format!("question {i}")).await.unwrap();
            assert!(executor.history().len() <= 6);
            assert!(!executor.history().iter().next().is_some_and(Message::is_tool_result));
        }

        assert_eq!(
            executor.history().last(),
            Some(&Message::assistant("answer 5"))
        );
        assert_eq!(provider.remaining().await, 0);
    }
}
