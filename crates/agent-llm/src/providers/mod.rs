//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LLMProvider trait for
//! OpenAI-compatible chat APIs and a scripted provider for tests.

pub mod mock;
#[cfg(feature = "openai")]
pub mod openai;

pub use mock::MockProvider;
#[cfg(feature = "openai")]
pub use openai::{OpenAIConfig, OpenAIProvider};
