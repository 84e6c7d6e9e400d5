//! File-backed per-user preference store.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use smartday_core::error::Result;
use smartday_core::preference::{PreferenceCategory, PreferenceStore};
use tracing::warn;

use crate::paths::{PathError, SmartdayPaths};

#[derive(Serialize, Deserialize)]
struct StoredPreference {
    category: PreferenceCategory,
}

/// Preference store keeping one small TOML file per user id.
///
/// Mirrors the backend's per-user record so the chat screen can restore the
/// selection without a network call. Absent or malformed files load as no
/// stored value.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    dir: PathBuf,
}

impl FilePreferenceStore {
    /// Creates a store at the default preferences directory.
    pub fn new() -> std::result::Result<Self, PathError> {
        Ok(Self {
            dir: SmartdayPaths::preferences_dir()?,
        })
    }

    /// Creates a store rooted at an explicit directory.
    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_for(&self, user_id: i64) -> PathBuf {
        self.dir.join(format!("user_{user_id}.toml"))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, user_id: i64) -> Option<PreferenceCategory> {
        let path = self.file_for(user_id);
        let content = fs::read_to_string(&path).ok()?;
        match toml::from_str::<StoredPreference>(&content) {
            Ok(stored) => Some(stored.category),
            Err(err) => {
                warn!("ignoring malformed preference file {path:?}: {err}");
                None
            }
        }
    }

    fn save(&self, user_id: i64, category: PreferenceCategory) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let content = toml::to_string_pretty(&StoredPreference { category })?;
        fs::write(self.file_for(user_id), content)?;
        Ok(())
    }
}
