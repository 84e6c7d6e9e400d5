//! Preference endpoints.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use smartday_core::backend::PreferenceApi;
use smartday_core::error::Result;
use smartday_core::preference::PreferenceCategory;
use tracing::debug;

use crate::client::BackendClient;
use crate::error::BackendError;

#[derive(Serialize)]
struct PreferenceBody {
    category: PreferenceCategory,
}

#[derive(Deserialize)]
struct PreferenceSaveResponse {
    #[serde(default)]
    message: Option<String>,
}

/// The stored record as returned by the read endpoint.
#[derive(Deserialize)]
struct PreferenceRecord {
    #[allow(dead_code)]
    user_id: i64,
    category: PreferenceCategory,
}

#[async_trait]
impl PreferenceApi for BackendClient {
    async fn save_preference(
        &self,
        user_id: i64,
        category: PreferenceCategory,
    ) -> Result<Option<String>> {
        debug!(user_id, %category, "saving preference");
        let response = self
            .client
            .post(self.url("/preferences/"))
            .query(&[("user_id", user_id)])
            .json(&PreferenceBody { category })
            .send()
            .await
            .map_err(BackendError::from)?;
        let response = Self::check(response).await?;
        let parsed: PreferenceSaveResponse =
            response.json().await.map_err(BackendError::from)?;
        Ok(parsed.message)
    }

    async fn fetch_preference(&self, user_id: i64) -> Result<Option<PreferenceCategory>> {
        let response = self
            .client
            .get(self.url("/preferences/"))
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(BackendError::from)?;
        // The backend answers 404 when the user has never saved one.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check(response).await?;
        let parsed: PreferenceRecord = response.json().await.map_err(BackendError::from)?;
        Ok(Some(parsed.category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_serializes_the_wire_literal() {
        let json = serde_json::to_value(&PreferenceBody {
            category: PreferenceCategory::Shopping,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"category":"쇼핑"}));
    }

    #[test]
    fn record_parses_the_wire_literal() {
        let parsed: PreferenceRecord =
            serde_json::from_str(r#"{"user_id":3,"category":"공원"}"#).unwrap();
        assert_eq!(parsed.category, PreferenceCategory::Parks);
    }
}
