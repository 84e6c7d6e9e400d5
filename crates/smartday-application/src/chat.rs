//! Chat session controller.
//!
//! Owns the append-only transcript and performs exactly one backend round
//! trip per sent message. The user message is appended before the network
//! completes; the reply (or a fixed fallback) is appended whenever the
//! exchange resolves. Overlapping sends are allowed and replies land in
//! whatever order the backend answers.

use std::sync::Arc;

use smartday_core::backend::ChatApi;
use smartday_core::chat::ChatTranscript;
use smartday_core::preference::PreferenceCategory;
use tracing::warn;

/// Bot line appended when an exchange fails for any reason.
pub const FALLBACK_REPLY: &str = "Something went wrong. Please try again.";

/// A prepared message, ready for one backend round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub preference: Option<PreferenceCategory>,
}

pub struct ChatSession {
    transcript: ChatTranscript,
    api: Arc<dyn ChatApi>,
}

impl ChatSession {
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        Self {
            transcript: ChatTranscript::new(),
            api,
        }
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    /// Appends the user message optimistically and returns the payload to
    /// dispatch. Whitespace-only input is a silent no-op.
    pub fn begin_send(
        &mut self,
        text: &str,
        preference: Option<PreferenceCategory>,
    ) -> Option<OutboundMessage> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.transcript.push_user(trimmed);
        Some(OutboundMessage {
            text: trimmed.to_string(),
            preference,
        })
    }

    /// One backend round trip for a prepared message. Failures collapse to
    /// the fallback reply; nothing propagates.
    pub async fn exchange(api: Arc<dyn ChatApi>, outbound: OutboundMessage) -> String {
        match api.send_message(&outbound.text, outbound.preference).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("chat request failed: {err}");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Appends the reply produced by [`Self::exchange`].
    pub fn apply_reply(&mut self, reply: impl Into<String>) {
        self.transcript.push_bot(reply);
    }

    /// Handle for dispatching [`Self::exchange`] from a spawned task.
    pub fn api_handle(&self) -> Arc<dyn ChatApi> {
        self.api.clone()
    }

    /// Sends one message end to end.
    pub async fn send(&mut self, text: &str, preference: Option<PreferenceCategory>) {
        let Some(outbound) = self.begin_send(text, preference) else {
            return;
        };
        let reply = Self::exchange(self.api.clone(), outbound).await;
        self.apply_reply(reply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeChatApi;
    use smartday_core::chat::Sender;
    use smartday_core::error::SmartdayError;

    #[tokio::test]
    async fn send_appends_user_then_bot_reply() {
        let api = Arc::new(FakeChatApi::replying(Ok("hi".to_string())));
        let mut chat = ChatSession::new(api);

        chat.send("hello", None).await;

        let messages = chat.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!((messages[0].sender, messages[0].text.as_str()), (Sender::User, "hello"));
        assert_eq!((messages[1].sender, messages[1].text.as_str()), (Sender::Bot, "hi"));
    }

    #[tokio::test]
    async fn whitespace_only_input_is_a_silent_no_op() {
        let api = Arc::new(FakeChatApi::replying(Ok("hi".to_string())));
        let mut chat = ChatSession::new(api);

        chat.send("   \t ", None).await;
        assert!(chat.transcript().is_empty());
    }

    #[tokio::test]
    async fn failed_exchange_appends_the_fallback_reply() {
        let api = Arc::new(FakeChatApi::replying(Err(SmartdayError::network(
            "connection refused",
        ))));
        let mut chat = ChatSession::new(api);

        chat.send("hello", Some(PreferenceCategory::Parks)).await;

        let messages = chat.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].sender, Sender::Bot);
        assert_eq!(messages[1].text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn input_is_trimmed_before_the_optimistic_append() {
        let api = Arc::new(FakeChatApi::replying(Ok("ok".to_string())));
        let mut chat = ChatSession::new(api);

        let outbound = chat.begin_send("  hello  ", None).unwrap();
        assert_eq!(outbound.text, "hello");
        assert_eq!(chat.transcript().messages()[0].text, "hello");
    }
}
