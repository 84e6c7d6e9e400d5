//! Account use case.
//!
//! Orchestrates sign-up, sign-in, and sign-out over the backend auth port
//! and the local session store. Screens consult [`AuthUseCase::current_session`]
//! before building anything that requires authentication.

use std::sync::Arc;

use smartday_core::backend::AuthApi;
use smartday_core::error::Result;
use smartday_core::session::{SessionStore, UserSession};
use tracing::warn;

/// Shown when the backend confirms a sign-up without a message of its own.
pub const DEFAULT_SIGNUP_MESSAGE: &str = "Account created. Please sign in.";

pub struct AuthUseCase {
    api: Arc<dyn AuthApi>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthUseCase {
    pub fn new(api: Arc<dyn AuthApi>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { api, sessions }
    }

    /// The persisted session, if any. Absence routes to the login screen.
    pub fn current_session(&self) -> Option<UserSession> {
        self.sessions.load()
    }

    /// Registers a new account and returns the message to show on the login
    /// screen.
    pub async fn sign_up(&self, email: &str, password: &str, username: &str) -> Result<String> {
        let message = self.api.sign_up(email, password, username).await?;
        Ok(message.unwrap_or_else(|| DEFAULT_SIGNUP_MESSAGE.to_string()))
    }

    /// Authenticates and persists the resulting session.
    ///
    /// The backend may omit `username`/`email`; the submitted email fills the
    /// gaps so the persisted record always has a usable identity.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession> {
        let outcome = self.api.sign_in(email, password).await?;
        let session = UserSession {
            id: outcome.user_id,
            username: outcome
                .username
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| email.to_string()),
            email: outcome
                .email
                .filter(|addr| !addr.is_empty())
                .unwrap_or_else(|| email.to_string()),
        };
        self.sessions.save(&session)?;
        Ok(session)
    }

    /// Ends the session. The backend sign-out is best-effort; the local
    /// record is cleared regardless so the tab always lands on the login
    /// screen.
    pub async fn sign_out(&self) -> Result<()> {
        if let Err(err) = self.api.sign_out().await {
            warn!("backend sign-out failed: {err}");
        }
        self.sessions.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeAuthApi, MemorySessionStore};
    use smartday_core::backend::SignInOutcome;

    #[tokio::test]
    async fn sign_in_persists_the_session_from_response_and_form() {
        let api = Arc::new(FakeAuthApi::signing_in(SignInOutcome {
            user_id: 1,
            username: Some("A".to_string()),
            email: None,
            message: None,
        }));
        let sessions = Arc::new(MemorySessionStore::default());
        let auth = AuthUseCase::new(api, sessions.clone());

        let session = auth.sign_in("a@b.com", "x").await.unwrap();
        assert_eq!(
            session,
            UserSession {
                id: 1,
                username: "A".to_string(),
                email: "a@b.com".to_string(),
            }
        );
        assert_eq!(auth.current_session(), Some(session));
    }

    #[tokio::test]
    async fn sign_in_falls_back_to_the_submitted_email_for_identity() {
        let api = Arc::new(FakeAuthApi::signing_in(SignInOutcome {
            user_id: 7,
            username: None,
            email: None,
            message: None,
        }));
        let auth = AuthUseCase::new(api, Arc::new(MemorySessionStore::default()));

        let session = auth.sign_in("solo@b.com", "x").await.unwrap();
        assert_eq!(session.username, "solo@b.com");
        assert_eq!(session.email, "solo@b.com");
    }

    #[tokio::test]
    async fn sign_up_uses_the_default_message_when_the_backend_is_silent() {
        let api = Arc::new(FakeAuthApi::default());
        let auth = AuthUseCase::new(api, Arc::new(MemorySessionStore::default()));

        let message = auth.sign_up("a@b.com", "x", "A").await.unwrap();
        assert_eq!(message, DEFAULT_SIGNUP_MESSAGE);
    }

    #[tokio::test]
    async fn sign_out_clears_locally_even_when_the_backend_fails() {
        let api = Arc::new(FakeAuthApi::failing_sign_out());
        let sessions = Arc::new(MemorySessionStore::with_session(UserSession {
            id: 1,
            username: "A".to_string(),
            email: "a@b.com".to_string(),
        }));
        let auth = AuthUseCase::new(api, sessions.clone());

        auth.sign_out().await.unwrap();
        assert_eq!(auth.current_session(), None);
    }
}
