use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{segment, ClientError, PortkeyClient};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListPartialsParams {
    pub collection_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PartialIdParams {
    /// Partial ID or slug.
    pub partial_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreatePartialParams {
    pub name: String,
    /// Reusable template fragment.
    pub string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdatePartialParams {
    #[serde(skip_serializing)]
    pub partial_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PublishPartialParams {
    #[serde(skip_serializing)]
    pub partial_id: String,
    /// Version number to make the default.
    pub version: u64,
}

/// Prompt partials (`/prompts/partials`).
pub struct Partials<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Partials<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListPartialsParams) -> Result<Value, ClientError> {
        self.client.get("/prompts/partials", params).await
    }

    pub async fn create(&self, params: &CreatePartialParams) -> Result<Value, ClientError> {
        self.client.post("/prompts/partials", Some(params)).await
    }

    pub async fn get(&self, partial_id: &str) -> Result<Value, ClientError> {
        self.client.get(&path(partial_id), &()).await
    }

    pub async fn update(&self, params: &UpdatePartialParams) -> Result<Value, ClientError> {
        self.client
            .put(&path(&params.partial_id), Some(params))
            .await
    }

    pub async fn delete(&self, partial_id: &str) -> Result<Value, ClientError> {
        self.client.delete(&path(partial_id)).await
    }

    pub async fn versions(&self, partial_id: &str) -> Result<Value, ClientError> {
        self.client
            .get(&format!("{}/versions", path(partial_id)), &())
            .await
    }

    pub async fn publish(&self, params: &PublishPartialParams) -> Result<Value, ClientError> {
        self.client
            .put(&format!("{}/makeDefault", path(&params.partial_id)), Some(params))
            .await
    }
}

fn path(partial_id: &str) -> String {
    format!("/prompts/partials/{}", segment(partial_id))
}
