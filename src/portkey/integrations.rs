use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{segment, ClientError, PortkeyClient};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListIntegrationsParams {
    pub workspace_id: Option<String>,
    /// `organisation`, `workspace` or `all`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct IntegrationSlugParams {
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateIntegrationParams {
    pub name: String,
    /// Provider identifier, e.g. `openai`.
    pub ai_provider_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Provider credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    /// Provider-specific settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateIntegrationParams {
    #[serde(skip_serializing)]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateIntegrationModelsParams {
    #[serde(skip_serializing)]
    pub slug: String,
    /// Allow every model the provider offers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_all_models: Option<bool>,
    /// Per-model entries `{slug, enabled, ...}`.
    pub models: Value,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateIntegrationWorkspacesParams {
    #[serde(skip_serializing)]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_workspace_access: Option<Value>,
    /// Per-workspace access entries `{id, enabled, usage_limits?, rate_limits?}`.
    pub workspaces: Value,
}

/// Organisation-level provider integrations (`/integrations`).
pub struct Integrations<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Integrations<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListIntegrationsParams) -> Result<Value, ClientError> {
        self.client.get("/integrations", params).await
    }

    pub async fn create(&self, params: &CreateIntegrationParams) -> Result<Value, ClientError> {
        self.client.post("/integrations", Some(params)).await
    }

    pub async fn get(&self, slug: &str) -> Result<Value, ClientError> {
        self.client.get(&path(slug), &()).await
    }

    pub async fn update(&self, params: &UpdateIntegrationParams) -> Result<Value, ClientError> {
        self.client.put(&path(&params.slug), Some(params)).await
    }

    pub async fn delete(&self, slug: &str) -> Result<Value, ClientError> {
        self.client.delete(&path(slug)).await
    }

    pub async fn models(&self, slug: &str) -> Result<Value, ClientError> {
        self.client
            .get(&format!("{}/models", path(slug)), &())
            .await
    }

    pub async fn update_models(&self, params: &UpdateIntegrationModelsParams) -> Result<Value, ClientError> {
        self.client
            .put(&format!("{}/models", path(&params.slug)), Some(params))
            .await
    }

    pub async fn workspaces(&self, slug: &str) -> Result<Value, ClientError> {
        self.client
            .get(&format!("{}/workspaces", path(slug)), &())
            .await
    }

    pub async fn update_workspaces(
        &self,
        params: &UpdateIntegrationWorkspacesParams,
    ) -> Result<Value, ClientError> {
        self.client
            .put(&format!("{}/workspaces", path(&params.slug)), Some(params))
            .await
    }
}

fn path(slug: &str) -> String {
    format!("/integrations/{}", segment(slug))
}
