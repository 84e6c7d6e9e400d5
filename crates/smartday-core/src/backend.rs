//! Backend API ports.
//!
//! These traits define the contract with the remote SmartDay backend,
//! decoupling the controllers from the HTTP transport. The reqwest
//! implementation lives in `smartday-api`; tests inject in-memory fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::map::{MapDataset, PointOfInterest};
use crate::preference::PreferenceCategory;

/// What a successful sign-in tells the client.
///
/// The backend may omit everything but the user id; the caller fills the
/// gaps from the submitted form values when building the persisted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutcome {
    pub user_id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Account operations.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Registers a new account; returns the backend's confirmation message
    /// when it sends one.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<Option<String>>;

    /// Authenticates with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInOutcome>;

    /// Invalidates the server-side token. The local session record is
    /// cleared regardless of this call's outcome.
    async fn sign_out(&self) -> Result<()>;
}

/// Preference persistence on the backend, keyed by user id.
#[async_trait]
pub trait PreferenceApi: Send + Sync {
    /// Upserts the category for `user_id`; returns the backend's
    /// confirmation message when it sends one.
    async fn save_preference(
        &self,
        user_id: i64,
        category: PreferenceCategory,
    ) -> Result<Option<String>>;

    /// Reads the stored category; `None` when the backend has none.
    async fn fetch_preference(&self, user_id: i64) -> Result<Option<PreferenceCategory>>;
}

/// The chat inference endpoint.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Sends one user message, with the current preference as context, and
    /// returns the bot's reply.
    async fn send_message(
        &self,
        message: &str,
        preference: Option<PreferenceCategory>,
    ) -> Result<String>;
}

/// Point-of-interest data per dataset.
#[async_trait]
pub trait MapApi: Send + Sync {
    async fn fetch_points(&self, dataset: MapDataset) -> Result<Vec<PointOfInterest>>;
}
