//! Configuration loading.

use std::fs;
use std::path::Path;

use smartday_core::config::AppConfig;
use smartday_core::error::Result;

use crate::paths::SmartdayPaths;

/// Loads the client configuration from the default location.
///
/// A missing config file (or an unresolvable config directory) yields the
/// defaults; a file that exists but cannot be read or parsed is an error the
/// caller should surface rather than silently ignore.
pub fn load_config() -> Result<AppConfig> {
    match SmartdayPaths::config_file() {
        Ok(path) => load_config_from(&path),
        Err(_) => Ok(AppConfig::default()),
    }
}

/// Loads the client configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "base_url = \"http://backend:9000\"\nrequest_timeout_secs = 30\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.base_url, "http://backend:9000");
        assert_eq!(config.request_timeout_secs, Some(30));
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [not toml").unwrap();
        assert!(load_config_from(&path).is_err());
    }
}
