//! Chat inference endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smartday_core::backend::ChatApi;
use smartday_core::error::Result;
use smartday_core::preference::PreferenceCategory;
use tracing::debug;

use crate::client::BackendClient;
use crate::error::BackendError;

#[derive(Serialize)]
struct ChatBody<'a> {
    request_message: &'a str,
    /// `null` when the user has no preference selected.
    preference: Option<PreferenceCategory>,
}

#[derive(Deserialize)]
struct ChatResponse {
    response_message: String,
}

#[async_trait]
impl ChatApi for BackendClient {
    async fn send_message(
        &self,
        message: &str,
        preference: Option<PreferenceCategory>,
    ) -> Result<String> {
        debug!(preference = ?preference, "issuing chat request");
        let response = self
            .client
            .post(self.url("/chatbot/chat-api"))
            .json(&ChatBody {
                request_message: message,
                preference,
            })
            .send()
            .await
            .map_err(BackendError::from)?;
        let response = Self::check(response).await?;
        let parsed: ChatResponse = response.json().await.map_err(BackendError::from)?;
        Ok(parsed.response_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_null_preference_when_unset() {
        let json = serde_json::to_value(&ChatBody {
            request_message: "hello",
            preference: None,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"request_message":"hello","preference":null})
        );
    }

    #[test]
    fn body_carries_the_selected_category() {
        let json = serde_json::to_value(&ChatBody {
            request_message: "what should I do today",
            preference: Some(PreferenceCategory::Attractions),
        })
        .unwrap();
        assert_eq!(json["preference"], "관광지");
    }

    #[test]
    fn response_parses() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"response_message":"hi"}"#).unwrap();
        assert_eq!(parsed.response_message, "hi");
    }
}
