//! Reqwest-backed gateway over the dev-tools Apex REST endpoints

use async_trait::async_trait;
use fieldscope_core::gateway::{ApexGateway, GatewayError, GatewayResult};
use fieldscope_core::types::{ProfileOption, ToolRecord, ValidationReport};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

const TOOLS_PATH: &str = "/services/apexrest/devtools/tools";
const PROFILES_PATH: &str = "/services/apexrest/devtools/profiles";
const VALIDATE_PATH: &str = "/services/apexrest/devtools/validate";
const VALIDATE_SYS_ADMIN_PATH: &str = "/services/apexrest/devtools/validate/sysadmin";

/// HTTP client for one org's dev-tools controllers
pub struct ApexRestClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl ApexRestClient {
    /// Client for the org at `base_url`, authenticating with a bearer token
    #[must_use]
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> GatewayResult<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        decode(response).await
    }
}

#[async_trait]
impl ApexGateway for ApexRestClient {
    async fn get_tools(&self) -> GatewayResult<Vec<ToolRecord>> {
        self.get_json(TOOLS_PATH).await
    }

    async fn get_available_profiles(&self) -> GatewayResult<Vec<ProfileOption>> {
        self.get_json(PROFILES_PATH).await
    }

    async fn validate_profile_fls(&self, profile_id: &str) -> GatewayResult<ValidationReport> {
        self.post_json(VALIDATE_PATH, &json!({ "profileId": profile_id }))
            .await
    }

    async fn validate_sys_admin_fls(&self) -> GatewayResult<ValidationReport> {
        self.post_json(VALIDATE_SYS_ADMIN_PATH, &json!({})).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(match extract_error_message(&body) {
            Some(message) => GatewayError::Server(message),
            None => GatewayError::Transport(format!("server returned {status}")),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))
}

/// Pull the structured message out of a platform error body.
///
/// REST errors usually arrive as `[{"message": ..., "errorCode": ...}]`;
/// a bare object with a `message` field is accepted too.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let entry = match &value {
        serde_json::Value::Array(entries) => entries.first()?,
        object @ serde_json::Value::Object(_) => object,
        _ => return None,
    };
    entry.get("message")?.as_str().map(str::to_string)
}
