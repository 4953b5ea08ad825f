use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{segment, ClientError, PortkeyClient};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListLabelsParams {
    pub organisation_id: Option<String>,
    pub workspace_id: Option<String>,
    pub search: Option<String>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LabelIdParams {
    pub label_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateLabelParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hex colour, e.g. `#3b82f6`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateLabelParams {
    #[serde(skip_serializing)]
    pub label_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
}

/// Prompt version labels (`/labels`).
pub struct Labels<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Labels<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListLabelsParams) -> Result<Value, ClientError> {
        self.client.get("/labels", params).await
    }

    pub async fn create(&self, params: &CreateLabelParams) -> Result<Value, ClientError> {
        self.client.post("/labels", Some(params)).await
    }

    pub async fn get(&self, label_id: &str) -> Result<Value, ClientError> {
        self.client.get(&path(label_id), &()).await
    }

    pub async fn update(&self, params: &UpdateLabelParams) -> Result<Value, ClientError> {
        self.client.put(&path(&params.label_id), Some(params)).await
    }

    pub async fn delete(&self, label_id: &str) -> Result<Value, ClientError> {
        self.client.delete(&path(label_id)).await
    }
}

fn path(label_id: &str) -> String {
    format!("/labels/{}", segment(label_id))
}
