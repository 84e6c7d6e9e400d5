//! Chat transcript model.
//!
//! The transcript is the append-only log of the conversation shown in the
//! chat view. It grows for the lifetime of the client and is never truncated
//! or edited.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    /// Message typed by the user.
    User,
    /// Message produced by the backend chatbot (or a local fallback).
    Bot,
}

/// A single message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// Timestamp when the message was appended (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    /// Creates a message stamped with the current time.
    pub fn now(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Append-only ordered sequence of chat messages.
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::now(Sender::User, text));
    }

    /// Appends a bot message.
    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::now(Sender::Bot, text));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_appends_in_order() {
        let mut transcript = ChatTranscript::new();
        transcript.push_user("hello");
        transcript.push_bot("hi");

        let senders: Vec<Sender> = transcript.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot]);
        assert_eq!(transcript.messages()[0].text, "hello");
        assert_eq!(transcript.messages()[1].text, "hi");
    }

    #[test]
    fn messages_carry_timestamps() {
        let message = ChatMessage::now(Sender::User, "x");
        assert!(!message.timestamp.is_empty());
    }
}
