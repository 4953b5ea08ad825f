use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{segment, ClientError, PortkeyClient};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListProvidersParams {
    pub workspace_id: Option<String>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProviderSlugParams {
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateProviderParams {
    pub name: String,
    /// Integration the provider draws credentials from.
    pub integration_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limits: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limits: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateProviderParams {
    #[serde(skip_serializing)]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limits: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limits: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Workspace-scoped AI providers (`/providers`).
pub struct Providers<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Providers<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListProvidersParams) -> Result<Value, ClientError> {
        self.client.get("/providers", params).await
    }

    pub async fn create(&self, params: &CreateProviderParams) -> Result<Value, ClientError> {
        self.client.post("/providers", Some(params)).await
    }

    pub async fn get(&self, slug: &str) -> Result<Value, ClientError> {
        self.client.get(&path(slug), &()).await
    }

    pub async fn update(&self, params: &UpdateProviderParams) -> Result<Value, ClientError> {
        self.client.put(&path(&params.slug), Some(params)).await
    }

    pub async fn delete(&self, slug: &str) -> Result<Value, ClientError> {
        self.client.delete(&path(slug)).await
    }
}

fn path(slug: &str) -> String {
    format!("/providers/{}", segment(slug))
}
