//! Bounded conversation history
//!
//! The history keeps user, assistant, tool call and tool result messages in
//! order. It never holds the system prompt; that is added per request.

use agent_llm::Message;
use std::collections::VecDeque;

/// Default number of messages kept between turns
pub const DEFAULT_HISTORY_MAX: usize = 16;

/// Ordered, bounded log of conversation messages
#[derive(Debug, Clone)]
pub struct History {
    messages: VecDeque<Message>,
    max_len: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_MAX)
    }
}

impl History {
    /// Create an empty history that trims to `max_len` messages
    pub fn new(max_len: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(max_len + 4),
            max_len,
        }
    }

    /// Maximum number of messages kept after a trim
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Append a message
    ///
    /// The history may grow past `max_len` during a turn; [`History::trim`]
    /// restores the bound once the turn is complete.
    pub fn push(&mut self, message: Message) {
        self.messages.push_back(message);
    }

    /// Drop the oldest messages until at most `max_len` remain
    ///
    /// Runs between turns. A tool result whose call was cut off is dropped,
    /// and so is a trailing tool call left unanswered by a failed turn, so
    /// the next request never carries half a call/result pair.
    pub fn trim(&mut self) {
        if self.messages.back().is_some_and(Message::is_tool_call) {
            self.messages.pop_back();
        }
        while self.messages.len() > self.max_len {
            self.messages.pop_front();
        }
        while self.messages.front().is_some_and(Message::is_tool_result) {
            self.messages.pop_front();
        }
    }

    /// Snapshot of the messages, oldest first
    pub fn messages(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    /// Iterate over the messages, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.back()
    }

    /// Number of messages currently held
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Forget the whole conversation
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
