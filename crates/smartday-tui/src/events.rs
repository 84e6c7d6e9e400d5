//! Events flowing back from spawned network tasks to the UI loop.

use smartday_application::map_overlay::LoadTicket;
use smartday_application::status::StatusMessage;
use smartday_core::error::Result;
use smartday_core::map::PointOfInterest;
use smartday_core::session::UserSession;

/// Results of background work, applied by the UI loop between draws.
#[derive(Debug)]
pub enum AppEvent {
    SignInFinished(Result<UserSession>),
    SignUpFinished(Result<String>),
    SignOutFinished,
    /// Outcome of a preference save (already folded into a status line).
    PreferenceSaved(StatusMessage),
    /// Bot reply for one chat exchange (failures already folded into the
    /// fallback line).
    ChatReply(String),
    MarkersFetched {
        ticket: LoadTicket,
        result: Result<Vec<PointOfInterest>>,
    },
}
