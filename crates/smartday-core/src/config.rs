//! Client configuration.

use serde::{Deserialize, Serialize};

/// Backend address used when the config file and CLI say nothing.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Configuration loaded from `config.toml`, with CLI overrides on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the SmartDay backend.
    pub base_url: String,
    /// Optional per-request timeout in seconds. Unset means requests resolve
    /// whenever the transport does.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());

        let config: AppConfig =
            toml::from_str("base_url = \"http://backend:9000\"").unwrap();
        assert_eq!(config.base_url, "http://backend:9000");
        assert_eq!(config.request_timeout_secs, None);
    }
}
