use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{segment, ClientError, PortkeyClient};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListConfigsParams {
    pub workspace_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ConfigSlugParams {
    /// Config slug (e.g. `pc-xxxx`).
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateConfigParams {
    pub name: String,
    /// Gateway config body: retry, cache, strategy, targets, ...
    pub config: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateConfigParams {
    #[serde(skip_serializing)]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    /// `active` or `archived`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Gateway configs (`/configs`).
pub struct Configs<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Configs<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListConfigsParams) -> Result<Value, ClientError> {
        self.client.get("/configs", params).await
    }

    pub async fn get(&self, slug: &str) -> Result<Value, ClientError> {
        self.client.get(&path(slug), &()).await
    }

    pub async fn create(&self, params: &CreateConfigParams) -> Result<Value, ClientError> {
        self.client.post("/configs", Some(params)).await
    }

    pub async fn update(&self, params: &UpdateConfigParams) -> Result<Value, ClientError> {
        self.client.put(&path(&params.slug), Some(params)).await
    }

    pub async fn delete(&self, slug: &str) -> Result<Value, ClientError> {
        self.client.delete(&path(slug)).await
    }

    pub async fn versions(&self, slug: &str) -> Result<Value, ClientError> {
        self.client
            .get(&format!("{}/versions", path(slug)), &())
            .await
    }
}

fn path(slug: &str) -> String {
    format!("/configs/{}", segment(slug))
}
