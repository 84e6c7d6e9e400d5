//! Error types for the SmartDay client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the SmartDay client crates.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SmartdayError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a usable response.
    #[error("Network error: {0}")]
    Network(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SmartdayError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a network-level failure (no backend response).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// The message the backend sent alongside a non-success status, when
    /// there is one to surface to the user.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SmartdayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SmartdayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SmartdayError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SmartdayError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SmartdayError>`.
pub type Result<T> = std::result::Result<T, SmartdayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_only_for_status_errors() {
        let err = SmartdayError::Status {
            status: 400,
            message: "duplicate email".to_string(),
        };
        assert_eq!(err.backend_message(), Some("duplicate email"));

        assert_eq!(SmartdayError::network("refused").backend_message(), None);
        let empty = SmartdayError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(empty.backend_message(), None);
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SmartdayError = io.into();
        assert!(matches!(err, SmartdayError::Io { .. }));
    }
}
