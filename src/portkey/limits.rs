use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{segment, ClientError, PortkeyClient};

/// Which policy collection a call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Usage,
    Rate,
}

impl LimitKind {
    fn base(self) -> &'static str {
        match self {
            LimitKind::Usage => "/policies/usage-limits",
            LimitKind::Rate => "/policies/rate-limits",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListLimitsParams {
    pub workspace_id: Option<String>,
    /// `active`, `exhausted` or `archived`.
    pub status: Option<String>,
    pub page_size: Option<u32>,
    pub current_page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LimitIdParams {
    /// Policy ID.
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateLimitParams {
    pub name: String,
    /// Request conditions the policy applies to, e.g. `[{"key":"api_key","value":"..."}]`.
    pub conditions: Value,
    /// Keys that bucket usage, e.g. `[{"key":"metadata.client_id"}]`.
    pub group_by: Value,
    /// `cost` or `tokens` for usage limits, `requests` or `tokens` for rate limits.
    #[serde(rename = "type")]
    pub kind: String,
    /// Usage limits: credit amount. Rate limits: allowed units per window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_threshold: Option<f64>,
    /// Usage limits: `monthly` or `weekly`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodic_reset: Option<String>,
    /// Rate limits: `rpm`, `rph` or `rpd`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Rate limits: allowed requests or tokens per unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateLimitParams {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodic_reset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    /// Clear accumulated usage for these group values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_usage_for_value: Option<String>,
}

/// Usage and rate limit policies (`/policies/...`).
pub struct Limits<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Limits<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, kind: LimitKind, params: &ListLimitsParams) -> Result<Value, ClientError> {
        self.client.get(kind.base(), params).await
    }

    pub async fn get(&self, kind: LimitKind, id: &str) -> Result<Value, ClientError> {
        self.client.get(&path(kind, id), &()).await
    }

    pub async fn create(&self, kind: LimitKind, params: &CreateLimitParams) -> Result<Value, ClientError> {
        self.client.post(kind.base(), Some(params)).await
    }

    pub async fn update(&self, kind: LimitKind, params: &UpdateLimitParams) -> Result<Value, ClientError> {
        self.client.put(&path(kind, &params.id), Some(params)).await
    }

    pub async fn delete(&self, kind: LimitKind, id: &str) -> Result<Value, ClientError> {
        self.client.delete(&path(kind, id)).await
    }
}

fn path(kind: LimitKind, id: &str) -> String {
    format!("{}/{}", kind.base(), segment(id))
}
