//! Account endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smartday_core::backend::{AuthApi, SignInOutcome};
use smartday_core::error::Result;
use tracing::debug;

use crate::client::BackendClient;
use crate::error::BackendError;

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    username: &'a str,
}

/// Sign-up success returns the created account; only an optional message is
/// of interest to the client.
#[derive(Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct SignInResponse {
    user_id: i64,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl AuthApi for BackendClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<Option<String>> {
        debug!(email, "issuing sign-up request");
        let response = self
            .client
            .post(self.url("/user/signup/"))
            .json(&SignUpBody {
                email,
                password,
                username,
            })
            .send()
            .await
            .map_err(BackendError::from)?;
        let response = Self::check(response).await?;
        let parsed: SignUpResponse = response.json().await.map_err(BackendError::from)?;
        Ok(parsed.message)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInOutcome> {
        debug!(email, "issuing sign-in request");
        let response = self
            .client
            .post(self.url("/user/login/"))
            .json(&SignInBody { email, password })
            .send()
            .await
            .map_err(BackendError::from)?;
        let response = Self::check(response).await?;
        let parsed: SignInResponse = response.json().await.map_err(BackendError::from)?;
        Ok(SignInOutcome {
            user_id: parsed.user_id,
            username: parsed.username,
            email: parsed.email,
            message: parsed.message,
        })
    }

    async fn sign_out(&self) -> Result<()> {
        let response = self
            .client
            .post(self.url("/user/logout/"))
            .send()
            .await
            .map_err(BackendError::from)?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_response_tolerates_missing_optionals() {
        let parsed: SignInResponse = serde_json::from_str(r#"{"user_id":1}"#).unwrap();
        assert_eq!(parsed.user_id, 1);
        assert_eq!(parsed.username, None);
        assert_eq!(parsed.email, None);
        assert_eq!(parsed.message, None);
    }

    #[test]
    fn sign_up_body_matches_the_wire_shape() {
        let body = SignUpBody {
            email: "a@b.com",
            password: "x",
            username: "A",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email":"a@b.com","password":"x","username":"A"})
        );
    }

    #[test]
    fn sign_up_response_without_message_parses() {
        let parsed: SignUpResponse =
            serde_json::from_str(r#"{"id":7,"email":"a@b.com","username":"A"}"#).unwrap();
        assert_eq!(parsed.message, None);
    }
}
