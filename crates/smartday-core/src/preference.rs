//! Preference category selection.
//!
//! The user can mark at most one category as their preference. The selection
//! follows click-to-toggle semantics and is persisted per user: locally for
//! restore-on-start, and to the backend on an explicit save.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::Result;

/// The backend's closed set of preference categories.
///
/// The serde literals are the exact strings the backend accepts; the Display
/// form is the label shown on the category buttons.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum PreferenceCategory {
    #[serde(rename = "쇼핑")]
    #[strum(serialize = "Shopping")]
    Shopping,
    #[serde(rename = "관광지")]
    #[strum(serialize = "Attractions")]
    Attractions,
    #[serde(rename = "문화시설")]
    #[strum(serialize = "Culture")]
    Culture,
    #[serde(rename = "공원")]
    #[strum(serialize = "Parks")]
    Parks,
}

/// At most one selected category, toggled by clicks.
///
/// Clicking the already-selected category clears the selection; clicking any
/// other category replaces it. Mutual exclusivity is structural: there is
/// only one slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferenceSelection {
    current: Option<PreferenceCategory>,
}

impl PreferenceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a click on `category`.
    pub fn click(&mut self, category: PreferenceCategory) {
        if self.current == Some(category) {
            self.current = None;
        } else {
            self.current = Some(category);
        }
    }

    /// Overwrites the selection from a persisted value.
    pub fn restore(&mut self, category: PreferenceCategory) {
        self.current = Some(category);
    }

    /// The currently selected category, if any.
    pub fn current(&self) -> Option<PreferenceCategory> {
        self.current
    }

    /// Whether `category` is the selected one (drives the button highlight).
    pub fn is_selected(&self, category: PreferenceCategory) -> bool {
        self.current == Some(category)
    }
}

/// Local per-user persistence for the preference value.
///
/// This mirrors what the backend stores but is read without a network call
/// when the chat screen mounts.
pub trait PreferenceStore: Send + Sync {
    /// Reads the stored category for `user_id`; absent or malformed data is
    /// `None`.
    fn load(&self, user_id: i64) -> Option<PreferenceCategory>;

    /// Persists the category for `user_id`.
    fn save(&self, user_id: i64, category: PreferenceCategory) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn click_selects_and_replaces() {
        let mut selection = PreferenceSelection::new();
        selection.click(PreferenceCategory::Parks);
        assert_eq!(selection.current(), Some(PreferenceCategory::Parks));

        selection.click(PreferenceCategory::Shopping);
        assert_eq!(selection.current(), Some(PreferenceCategory::Shopping));
        assert!(!selection.is_selected(PreferenceCategory::Parks));
    }

    #[test]
    fn clicking_selected_category_clears() {
        let mut selection = PreferenceSelection::new();
        selection.click(PreferenceCategory::Culture);
        selection.click(PreferenceCategory::Culture);
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn selection_tracks_last_click_across_sequences() {
        // For any click sequence, the selection equals the last-clicked
        // category unless it was already selected, in which case it is none.
        let clicks = [
            PreferenceCategory::Shopping,
            PreferenceCategory::Parks,
            PreferenceCategory::Parks,
            PreferenceCategory::Attractions,
            PreferenceCategory::Culture,
        ];
        let mut selection = PreferenceSelection::new();
        let mut expected = None;
        for click in clicks {
            expected = if expected == Some(click) { None } else { Some(click) };
            selection.click(click);
            assert_eq!(selection.current(), expected);
        }
    }

    #[test]
    fn wire_literals_round_trip() {
        for category in PreferenceCategory::iter() {
            let json = serde_json::to_string(&category).unwrap();
            let back: PreferenceCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
        assert_eq!(
            serde_json::to_string(&PreferenceCategory::Parks).unwrap(),
            "\"공원\""
        );
    }
}
