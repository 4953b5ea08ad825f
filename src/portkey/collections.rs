use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{segment, ClientError, PortkeyClient};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListCollectionsParams {
    pub workspace_id: Option<String>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    /// Case-insensitive name search.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CollectionIdParams {
    /// Collection ID or slug.
    pub collection_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateCollectionParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    /// Nest the new collection under this parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_collection_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCollectionParams {
    #[serde(skip_serializing)]
    pub collection_id: String,
    pub name: String,
}

/// Prompt collections (`/prompts/collections`), used to group prompts per app.
pub struct Collections<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Collections<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListCollectionsParams) -> Result<Value, ClientError> {
        self.client.get("/prompts/collections", params).await
    }

    pub async fn create(&self, params: &CreateCollectionParams) -> Result<Value, ClientError> {
        self.client.post("/prompts/collections", Some(params)).await
    }

    pub async fn get(&self, collection_id: &str) -> Result<Value, ClientError> {
        self.client.get(&path(collection_id), &()).await
    }

    pub async fn update(&self, params: &UpdateCollectionParams) -> Result<Value, ClientError> {
        self.client
            .put(&path(&params.collection_id), Some(params))
            .await
    }

    pub async fn delete(&self, collection_id: &str) -> Result<Value, ClientError> {
        self.client.delete(&path(collection_id)).await
    }
}

fn path(collection_id: &str) -> String {
    format!("/prompts/collections/{}", segment(collection_id))
}
