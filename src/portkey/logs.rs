use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{segment, ClientError, PortkeyClient};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InsertLogParams {
    /// Request as sent to the provider: `{url, method, headers, body, provider}`.
    pub request: Value,
    /// Provider response: `{status, headers, body, response_time}`.
    pub response: Value,
    /// Trace, span and custom metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateLogExportParams {
    /// Log filters, e.g. `{"time_of_generation_min": "...", "cost_min": 1}`.
    pub filters: Value,
    /// Columns to include in the export.
    pub requested_data: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListLogExportsParams {
    pub workspace_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportIdParams {
    pub export_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateLogExportParams {
    #[serde(skip_serializing)]
    pub export_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_data: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

/// Custom log insertion and bulk log exports (`/logs`).
pub struct Logs<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Logs<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn insert(&self, params: &InsertLogParams) -> Result<Value, ClientError> {
        self.client.post("/logs", Some(params)).await
    }

    pub async fn create_export(&self, params: &CreateLogExportParams) -> Result<Value, ClientError> {
        self.client.post("/logs/exports", Some(params)).await
    }

    pub async fn list_exports(&self, params: &ListLogExportsParams) -> Result<Value, ClientError> {
        self.client.get("/logs/exports", params).await
    }

    pub async fn get_export(&self, export_id: &str) -> Result<Value, ClientError> {
        self.client.get(&export_path(export_id), &()).await
    }

    pub async fn update_export(&self, params: &UpdateLogExportParams) -> Result<Value, ClientError> {
        self.client
            .put(&export_path(&params.export_id), Some(params))
            .await
    }

    pub async fn start_export(&self, export_id: &str) -> Result<Value, ClientError> {
        self.client
            .post::<_, ()>(&format!("{}/start", export_path(export_id)), None)
            .await
    }

    pub async fn cancel_export(&self, export_id: &str) -> Result<Value, ClientError> {
        self.client
            .post::<_, ()>(&format!("{}/cancel", export_path(export_id)), None)
            .await
    }

    /// Returns the signed download URL once the export has finished.
    pub async fn download_export(&self, export_id: &str) -> Result<Value, ClientError> {
        self.client
            .get(&format!("{}/download", export_path(export_id)), &())
            .await
    }
}

fn export_path(export_id: &str) -> String {
    format!("/logs/exports/{}", segment(export_id))
}
