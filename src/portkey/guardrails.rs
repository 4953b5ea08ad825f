use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{segment, ClientError, PortkeyClient};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListGuardrailsParams {
    pub workspace_id: Option<String>,
    pub organisation_id: Option<String>,
    pub page_size: Option<u32>,
    pub current_page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GuardrailIdParams {
    /// Guardrail ID or slug.
    pub guardrail_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateGuardrailParams {
    pub name: String,
    /// Checks to run, each `{id, parameters}`.
    pub checks: Value,
    /// Action taken when a check fails (`deny`, `async`, `on_fail`, ...).
    pub actions: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisation_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateGuardrailParams {
    #[serde(skip_serializing)]
    pub guardrail_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Value>,
}

pub struct Guardrails<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Guardrails<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListGuardrailsParams) -> Result<Value, ClientError> {
        self.client.get("/guardrails", params).await
    }

    pub async fn get(&self, guardrail_id: &str) -> Result<Value, ClientError> {
        self.client.get(&path(guardrail_id), &()).await
    }

    pub async fn create(&self, params: &CreateGuardrailParams) -> Result<Value, ClientError> {
        self.client.post("/guardrails", Some(params)).await
    }

    pub async fn update(&self, params: &UpdateGuardrailParams) -> Result<Value, ClientError> {
        self.client
            .put(&path(&params.guardrail_id), Some(params))
            .await
    }

    pub async fn delete(&self, guardrail_id: &str) -> Result<Value, ClientError> {
        self.client.delete(&path(guardrail_id)).await
    }
}

fn path(guardrail_id: &str) -> String {
    format!("/guardrails/{}", segment(guardrail_id))
}
