//! User session domain model.

use serde::{Deserialize, Serialize};

/// The authenticated user identity persisted between client runs.
///
/// Built from the sign-in response plus the submitted form values (the
/// backend may omit `username`/`email`, in which case the form values fill
/// the gaps). Read on every start to decide whether the chat screen may be
/// shown at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    /// Backend user id.
    pub id: i64,
    /// Display name chosen at sign-up.
    pub username: String,
    /// Sign-in email address.
    pub email: String,
}

impl UserSession {
    /// Name shown in the user badge, falling back to the email address.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }

    /// Uppercased initial for the avatar badge, `"U"` when nothing usable.
    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "U".to_string())
    }
}
