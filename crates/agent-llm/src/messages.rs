//! Message types for LLM communication
//!
//! A conversation is an ordered list of [`Message`]s. Besides plain user and
//! assistant text, the model can ask for a tool to be run (`ToolCall`) and the
//! caller answers with the tool's output (`ToolResult`). A `ToolResult` must
//! directly follow the `ToolCall` it answers.

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// User message
    User,
    /// Assistant message (text or tool call)
    Assistant,
    /// Tool output fed back to the model
    Tool,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    /// Fixed instructional text, sent ahead of everything else
    System {
        /// Instructions
        content: String,
    },

    /// Free-text query from the user
    User {
        /// Query text
        content: String,
    },

    /// Free-text answer from the assistant
    Assistant {
        /// Answer text
        content: String,
    },

    /// Tool use request from the assistant
    ToolCall {
        /// Provider-assigned call ID
        id: String,
        /// Tool name
        name: String,
        /// JSON-encoded arguments, exactly as produced by the model
        arguments: String,
    },

    /// Tool output answering a previous `ToolCall`
    ToolResult {
        /// ID of the tool call this is responding to
        tool_call_id: String,
        /// Tool name
        name: String,
        /// Result content
        content: String,
    },
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self::User {
            content: text.into(),
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant {
            content: text.into(),
        }
    }

    /// Create a system message with text
    pub fn system(text: impl Into<String>) -> Self {
        Self::System {
            content: text.into(),
        }
    }

    /// Create an assistant tool call
    pub fn tool_call(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self::ToolCall {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Create a tool result for the call with `tool_call_id`
    pub fn tool_result(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::ToolResult {
            tool_call_id: tool_call_id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// Role of the message on the wire
    pub fn role(&self) -> Role {
        match self {
            Self::System { .. } => Role::System,
            Self::User { .. } => Role::User,
            Self::Assistant { .. } | Self::ToolCall { .. } => Role::Assistant,
            Self::ToolResult { .. } => Role::Tool,
        }
    }

    /// Extract text content from the message
    ///
    /// Tool calls carry no visible content and return `None`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::System { content }
            | Self::User { content }
            | Self::Assistant { content }
            | Self::ToolResult { content, .. } => Some(content.as_str()),
            Self::ToolCall { .. } => None,
        }
    }

    /// Check if this message is a tool call
    pub fn is_tool_call(&self) -> bool {
        matches!(self, Self::ToolCall { .. })
    }

    /// Check if this message is a tool result
    pub fn is_tool_result(&self) -> bool {
        matches!(self, Self::ToolResult { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role(), Role::User);
        assert_eq!(msg.text(), Some("Hello"));
    }

    #[test]
    fn test_assistant_message() {
        let msg = Message::assistant("Hi there");
        assert_eq!(msg.role(), Role::Assistant);
        assert_eq!(msg.text(), Some("Hi there"));
    }

    #[test]
    fn test_tool_call_has_no_text() {
        let msg = Message::tool_call("call_1", "get_quote", r#"{"ticker":"CRM"}"#);
        assert_eq!(msg.role(), Role::Assistant);
        assert!(msg.is_tool_call());
        assert_eq!(msg.text(), None);
    }

    #[test]
    fn test_tool_result() {
        let msg = Message::tool_result("call_1", "get_quote", "close: 250.1");
        assert_eq!(msg.role(), Role::Tool);
        assert!(msg.is_tool_result());
        assert!(!msg.is_tool_call());
        assert_eq!(msg.text(), Some("close: 250.1"));
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::tool_call("call_1", "lookup_ticker", r#"{"company":"Salesforce"}"#);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "tool_call");
        assert_eq!(json["arguments"], r#"{"company":"Salesforce"}"#);

        let deserialized: Message = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, msg);
    }
}
