//! File-backed session store.

use std::fs;
use std::path::PathBuf;

use smartday_core::error::Result;
use smartday_core::session::{SessionStore, UserSession};
use tracing::warn;

use crate::paths::{PathError, SmartdayPaths};

/// Session store persisting a single JSON record.
///
/// The record lives at `~/.config/smartday/smartday_user.json`. A missing or
/// malformed file loads as absence so a corrupt record can never break
/// startup; it is overwritten by the next save.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    /// Creates a store at the default session file location.
    pub fn new() -> std::result::Result<Self, PathError> {
        Ok(Self {
            path: SmartdayPaths::session_file()?,
        })
    }

    /// Creates a store at an explicit path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Option<UserSession> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("failed to read session file {:?}: {err}", self.path);
                }
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!("ignoring malformed session file {:?}: {err}", self.path);
                None
            }
        }
    }

    fn save(&self, session: &UserSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
