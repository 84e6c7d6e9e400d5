//! Preference controller.
//!
//! Owns the single selected category, restores it from the local per-user
//! store on mount, and pushes it to the backend on an explicit save. All
//! failure paths resolve to a status line; nothing here can take the UI
//! down.

use std::sync::Arc;

use smartday_core::backend::PreferenceApi;
use smartday_core::preference::{PreferenceCategory, PreferenceSelection, PreferenceStore};
use smartday_core::session::SessionStore;
use tracing::warn;

use crate::status::StatusMessage;

/// Status line when saving without a signed-in user.
pub const NO_SESSION_STATUS: &str = "No user information. Please sign in again.";
/// Status line when saving without a selection.
pub const NO_SELECTION_STATUS: &str = "Select a preference first.";
/// Interim status line while the save request is in flight.
pub const SAVING_STATUS: &str = "Saving...";
/// Shown when the backend confirms a save without a message of its own.
pub const SAVED_DEFAULT_STATUS: &str = "Preference saved.";

/// A validated save, ready to be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveRequest {
    pub user_id: i64,
    pub category: PreferenceCategory,
}

pub struct PreferenceController {
    selection: PreferenceSelection,
    api: Arc<dyn PreferenceApi>,
    store: Arc<dyn PreferenceStore>,
    sessions: Arc<dyn SessionStore>,
}

impl PreferenceController {
    pub fn new(
        api: Arc<dyn PreferenceApi>,
        store: Arc<dyn PreferenceStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            selection: PreferenceSelection::new(),
            api,
            store,
            sessions,
        }
    }

    /// Applies a click on a category button (toggle semantics).
    pub fn click_category(&mut self, category: PreferenceCategory) {
        self.selection.click(category);
    }

    pub fn selection(&self) -> PreferenceSelection {
        self.selection
    }

    pub fn current(&self) -> Option<PreferenceCategory> {
        self.selection.current()
    }

    /// Restores the locally persisted per-user value, if any.
    ///
    /// Deliberately local-only: the backend copy is never read here, so the
    /// two can diverge across devices. Parity with the behavior this client
    /// replaces wins over reconciliation.
    pub fn load(&mut self) {
        let Some(user) = self.sessions.load() else {
            return;
        };
        if let Some(category) = self.store.load(user.id) {
            self.selection.restore(category);
        }
    }

    /// Validates a save without touching the network.
    ///
    /// A missing session or empty selection yields the status line to show
    /// instead; no request may be issued in that case.
    pub fn save_request(&self) -> std::result::Result<SaveRequest, StatusMessage> {
        let Some(user) = self.sessions.load() else {
            return Err(StatusMessage::error(NO_SESSION_STATUS));
        };
        let Some(category) = self.selection.current() else {
            return Err(StatusMessage::error(NO_SELECTION_STATUS));
        };
        Ok(SaveRequest {
            user_id: user.id,
            category,
        })
    }

    /// Executes a validated save: one backend write, mirrored into the local
    /// store on success. Always resolves to a status line.
    pub async fn perform_save(
        api: Arc<dyn PreferenceApi>,
        store: Arc<dyn PreferenceStore>,
        request: SaveRequest,
    ) -> StatusMessage {
        match api.save_preference(request.user_id, request.category).await {
            Ok(message) => {
                if let Err(err) = store.save(request.user_id, request.category) {
                    warn!("failed to persist preference locally: {err}");
                }
                StatusMessage::info(message.unwrap_or_else(|| SAVED_DEFAULT_STATUS.to_string()))
            }
            Err(err) => {
                warn!("preference save failed: {err}");
                let text = err
                    .backend_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                StatusMessage::error(text)
            }
        }
    }

    /// Validates and saves in one call.
    pub async fn save(&self) -> StatusMessage {
        match self.save_request() {
            Ok(request) => {
                Self::perform_save(self.api.clone(), self.store.clone(), request).await
            }
            Err(status) => status,
        }
    }

    /// Handles for dispatching [`Self::perform_save`] from a spawned task.
    pub fn api_handle(&self) -> Arc<dyn PreferenceApi> {
        self.api.clone()
    }

    pub fn store_handle(&self) -> Arc<dyn PreferenceStore> {
        self.store.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusKind;
    use crate::testing::{FakePreferenceApi, MemoryPreferenceStore, MemorySessionStore};
    use smartday_core::error::SmartdayError;
    use smartday_core::preference::PreferenceStore as _;
    use smartday_core::session::UserSession;
    use std::sync::atomic::Ordering;

    fn signed_in() -> Arc<MemorySessionStore> {
        Arc::new(MemorySessionStore::with_session(UserSession {
            id: 1,
            username: "A".to_string(),
            email: "a@b.com".to_string(),
        }))
    }

    #[tokio::test]
    async fn save_without_session_issues_no_network_call() {
        let api = Arc::new(FakePreferenceApi::default());
        let mut controller = PreferenceController::new(
            api.clone(),
            Arc::new(MemoryPreferenceStore::default()),
            Arc::new(MemorySessionStore::default()),
        );
        controller.click_category(PreferenceCategory::Parks);

        let status = controller.save().await;
        assert_eq!(status, StatusMessage::error(NO_SESSION_STATUS));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn save_without_selection_issues_no_network_call() {
        let api = Arc::new(FakePreferenceApi::default());
        let controller = PreferenceController::new(
            api.clone(),
            Arc::new(MemoryPreferenceStore::default()),
            signed_in(),
        );

        let status = controller.save().await;
        assert_eq!(status, StatusMessage::error(NO_SELECTION_STATUS));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_save_shows_the_backend_message_and_mirrors_locally() {
        let api = Arc::new(FakePreferenceApi::replying(Ok(Some(
            "saved".to_string(),
        ))));
        let store = Arc::new(MemoryPreferenceStore::default());
        let mut controller = PreferenceController::new(api.clone(), store.clone(), signed_in());
        controller.click_category(PreferenceCategory::Culture);

        let status = controller.save().await;
        assert_eq!(status, StatusMessage::info("saved"));
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.load(1), Some(PreferenceCategory::Culture));
    }

    #[tokio::test]
    async fn failed_save_surfaces_the_backend_detail() {
        let api = Arc::new(FakePreferenceApi::replying(Err(SmartdayError::Status {
            status: 404,
            message: "unknown user".to_string(),
        })));
        let mut controller = PreferenceController::new(
            api,
            Arc::new(MemoryPreferenceStore::default()),
            signed_in(),
        );
        controller.click_category(PreferenceCategory::Parks);

        let status = controller.save().await;
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "unknown user");
    }

    #[tokio::test]
    async fn load_restores_the_stored_value_for_the_signed_in_user() {
        let store = Arc::new(MemoryPreferenceStore::default());
        store.save(1, PreferenceCategory::Shopping).unwrap();
        let mut controller = PreferenceController::new(
            Arc::new(FakePreferenceApi::default()),
            store,
            signed_in(),
        );

        controller.load();
        assert_eq!(controller.current(), Some(PreferenceCategory::Shopping));
    }

    #[tokio::test]
    async fn load_without_session_leaves_the_selection_empty() {
        let store = Arc::new(MemoryPreferenceStore::default());
        store.save(1, PreferenceCategory::Shopping).unwrap();
        let mut controller = PreferenceController::new(
            Arc::new(FakePreferenceApi::default()),
            store,
            Arc::new(MemorySessionStore::default()),
        );

        controller.load();
        assert_eq!(controller.current(), None);
    }
}
