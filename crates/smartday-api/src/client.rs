//! HTTP client for the SmartDay backend.

use std::time::Duration;

use reqwest::{Client, Response};
use smartday_core::config::AppConfig;

use crate::error::{error_message, BackendError};

/// Client for every SmartDay backend endpoint.
///
/// One instance is shared by all controllers; reqwest pools connections
/// internally, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct BackendClient {
    pub(crate) client: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client against `base_url` with transport defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize(base_url.into()),
        }
    }

    /// Builds a client from configuration, applying the optional per-request
    /// timeout. Without a configured timeout, requests resolve whenever the
    /// transport does.
    pub fn from_config(config: &AppConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(BackendError::from)?;
        Ok(Self {
            client,
            base_url: normalize(config.base_url.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resolves a response into an error when the status is non-success,
    /// extracting the backend's message from the body.
    pub(crate) async fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let client = BackendClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.url("/user/login/"), "http://127.0.0.1:8000/user/login/");

        let client = BackendClient::new("http://backend:9000");
        assert_eq!(client.url("/map/parks"), "http://backend:9000/map/parks");
    }

    #[test]
    fn from_config_accepts_defaults() {
        let client = BackendClient::from_config(&AppConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }
}
