//! Signed-in user session.
//!
//! The session is the client-side record of an authenticated user. It is
//! created from a successful sign-in, persisted between runs, and removed on
//! sign-out. Screens that require authentication consult it before they are
//! allowed to build anything else.

mod model;
mod store;

pub use model::UserSession;
pub use store::SessionStore;
