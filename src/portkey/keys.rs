use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{segment, ClientError, PortkeyClient};

/// Spend cap attached to a key.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UsageLimits {
    /// Spend threshold (USD) that triggers an alert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_threshold: Option<f64>,
    /// Hard spend limit (USD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    /// Reset cadence, e.g. `monthly`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodic_reset: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RateLimit {
    /// e.g. `requests`.
    #[serde(rename = "type")]
    pub kind: String,
    /// e.g. `rpm`.
    pub unit: String,
    pub value: u64,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListVirtualKeysParams {
    pub workspace_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VirtualKeySlugParams {
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateVirtualKeyParams {
    pub name: String,
    /// Provider identifier, e.g. `openai` or `anthropic`.
    pub provider: String,
    /// Provider credential stored behind the virtual key.
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limits: Option<UsageLimits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limits: Option<Vec<RateLimit>>,
    /// Provider-specific settings (deployment names, regions, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_config: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateVirtualKeyParams {
    #[serde(skip_serializing)]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limits: Option<UsageLimits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limits: Option<Vec<RateLimit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_config: Option<Value>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListApiKeysParams {
    pub page_size: Option<u32>,
    pub current_page: Option<u32>,
    pub workspace_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiKeyIdParams {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateApiKeyParams {
    /// `organisation` or `workspace`.
    #[serde(skip_serializing, rename = "type")]
    pub kind: String,
    /// `user` or `service`.
    #[serde(skip_serializing)]
    pub sub_type: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    /// Required for user keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limits: Option<Vec<RateLimit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limits: Option<UsageLimits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Value>,
    /// Expiry timestamp (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateApiKeyParams {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limits: Option<Vec<RateLimit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limits: Option<UsageLimits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Virtual keys (`/virtual-keys`) and admin API keys (`/api-keys`).
pub struct Keys<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Keys<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list_virtual(&self, params: &ListVirtualKeysParams) -> Result<Value, ClientError> {
        self.client.get("/virtual-keys", params).await
    }

    pub async fn get_virtual(&self, slug: &str) -> Result<Value, ClientError> {
        self.client.get(&virtual_path(slug), &()).await
    }

    pub async fn create_virtual(&self, params: &CreateVirtualKeyParams) -> Result<Value, ClientError> {
        self.client.post("/virtual-keys", Some(params)).await
    }

    pub async fn update_virtual(&self, params: &UpdateVirtualKeyParams) -> Result<Value, ClientError> {
        self.client
            .put(&virtual_path(&params.slug), Some(params))
            .await
    }

    pub async fn delete_virtual(&self, slug: &str) -> Result<Value, ClientError> {
        self.client.delete(&virtual_path(slug)).await
    }

    pub async fn list_api(&self, params: &ListApiKeysParams) -> Result<Value, ClientError> {
        self.client.get("/api-keys", params).await
    }

    pub async fn get_api(&self, id: &str) -> Result<Value, ClientError> {
        self.client.get(&api_path(id), &()).await
    }

    pub async fn create_api(&self, params: &CreateApiKeyParams) -> Result<Value, ClientError> {
        let path = format!(
            "/api-keys/{}/{}",
            segment(&params.kind),
            segment(&params.sub_type)
        );
        self.client.post(&path, Some(params)).await
    }

    pub async fn update_api(&self, params: &UpdateApiKeyParams) -> Result<Value, ClientError> {
        self.client.put(&api_path(&params.id), Some(params)).await
    }

    pub async fn delete_api(&self, id: &str) -> Result<Value, ClientError> {
        self.client.delete(&api_path(id)).await
    }
}

fn virtual_path(slug: &str) -> String {
    format!("/virtual-keys/{}", segment(slug))
}

fn api_path(id: &str) -> String {
    format!("/api-keys/{}", segment(id))
}
