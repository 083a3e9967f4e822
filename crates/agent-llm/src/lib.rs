//! Chat-completion abstraction layer for the stock agent
//!
//! This crate provides provider-agnostic types for talking to a chat model
//! that supports function calling:
//!
//! - Message types for the conversation (user, assistant, tool call, tool result)
//! - Completion request/response types
//! - Tool definitions advertised to the model
//! - Provider trait plus the OpenAI implementation (behind the `openai` feature)
//!   and a scripted mock for tests

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;
pub mod tools;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;
