//! Unified path management for SmartDay client files.
//!
//! All client-side persistence lives under the platform config directory:
//!
//! ```text
//! ~/.config/smartday/            # Config directory
//! ├── config.toml                # Client configuration
//! ├── smartday_user.json         # Signed-in user record
//! ├── preferences/               # Per-user preference values
//! │   └── user_<id>.toml
//! └── logs/                      # Client logs
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for the SmartDay client.
pub struct SmartdayPaths;

impl SmartdayPaths {
    /// Returns the SmartDay configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("smartday"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session record.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("smartday_user.json"))
    }

    /// Returns the directory holding per-user preference values.
    pub fn preferences_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("preferences"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = SmartdayPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("smartday"));
    }

    #[test]
    fn test_config_file() {
        let config_file = SmartdayPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = SmartdayPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_session_file() {
        let session_file = SmartdayPaths::session_file().unwrap();
        assert!(session_file.ends_with("smartday_user.json"));
    }

    #[test]
    fn test_preferences_dir() {
        let preferences_dir = SmartdayPaths::preferences_dir().unwrap();
        assert!(preferences_dir.ends_with("preferences"));
        let config_dir = SmartdayPaths::config_dir().unwrap();
        assert!(preferences_dir.starts_with(&config_dir));
    }

    #[test]
    fn test_logs_dir() {
        let logs_dir = SmartdayPaths::logs_dir().unwrap();
        assert!(logs_dir.ends_with("logs"));
    }
}
