//! Session persistence port.

use super::model::UserSession;
use crate::error::Result;

/// An abstract store for the single signed-in user record.
///
/// This trait decouples session handling from the storage mechanism (a JSON
/// file in the real client, an in-memory map in tests).
///
/// # Implementation Notes
///
/// Implementations must treat unreadable or malformed data as absence:
/// `load` returns `None` rather than failing, so a corrupt record routes the
/// user to the login screen instead of breaking startup.
pub trait SessionStore: Send + Sync {
    /// Reads the persisted session, if any. No side effects.
    fn load(&self) -> Option<UserSession>;

    /// Persists the session record, replacing any previous one.
    fn save(&self, session: &UserSession) -> Result<()>;

    /// Removes the persisted session. Clearing an absent record is not an
    /// error.
    fn clear(&self) -> Result<()>;
}
