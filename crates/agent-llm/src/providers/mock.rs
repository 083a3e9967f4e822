//! Scripted provider for tests

use crate::{CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// A mock provider that returns pre-configured responses for testing
///
/// Every request is recorded so tests can inspect what was sent. Once the
/// script runs out, further calls fail with `UnexpectedResponse`.
#[derive(Default)]
pub struct MockProvider {
    responses: Mutex<VecDeque<Result<CompletionResponse>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<Result<CompletionResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock provider that replies with the given messages in order
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self::new(
            messages
                .into_iter()
                .map(|message| Ok(reply(message)))
                .collect(),
        )
    }

    /// Requests received so far, oldest first
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of scripted responses not yet consumed
    pub async fn remaining(&self) -> usize {
        self.responses.lock().await.len()
    }
}

/// Wrap a message into a completion response with a matching stop reason
pub fn reply(message: Message) -> CompletionResponse {
    let stop_reason = if message.is_tool_call() {
        crate::StopReason::ToolUse
    } else {
        crate::StopReason::EndTurn
    };

    CompletionResponse {
        message,
        stop_reason,
        usage: crate::TokenUsage::default(),
    }
}

#[async_trait]
impl LLMProvider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests.lock().await.push(request);

        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| {
                Err(LLMError::UnexpectedResponse(
                    "mock provider has no scripted response left".to_string(),
                ))
            })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
