//! Error type for backend HTTP calls.

use serde::Deserialize;
use smartday_core::SmartdayError;
use thiserror::Error;

/// What went wrong while talking to the backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("request failed: {message}")]
    Transport {
        message: String,
        is_connect: bool,
        is_timeout: bool,
    },

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode backend response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport {
                message: err.to_string(),
                is_connect: err.is_connect(),
                is_timeout: err.is_timeout(),
            }
        }
    }
}

impl From<BackendError> for SmartdayError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Status { status, message } => Self::Status { status, message },
            other => Self::Network(other.to_string()),
        }
    }
}

/// Error bodies the backend produces: FastAPI's `{"detail": ...}` for raised
/// errors, `{"message": ...}` for handler-level responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Extracts the most useful message from a failure body, falling back to the
/// raw text for non-JSON bodies (the chat endpoint returns plain text).
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.detail))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_then_detail_then_raw() {
        assert_eq!(error_message(r#"{"message":"m","detail":"d"}"#), "m");
        assert_eq!(error_message(r#"{"detail":"d"}"#), "d");
        assert_eq!(error_message("plain failure text"), "plain failure text");
        assert_eq!(error_message("{}"), "{}");
    }

    #[test]
    fn status_errors_carry_their_message_into_the_shared_type() {
        let err: SmartdayError = BackendError::Status {
            status: 404,
            message: "no such user".to_string(),
        }
        .into();
        assert_eq!(err.backend_message(), Some("no such user"));
    }
}
