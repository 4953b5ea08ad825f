use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ClientError, PortkeyClient};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListAuditLogsParams {
    pub workspace_id: Option<String>,
    /// User who performed the action.
    pub actor_id: Option<String>,
    /// `create`, `update`, `delete`, ...
    pub action: Option<String>,
    /// Resource type, e.g. `workspace` or `virtual-key`.
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    /// Start of the window (ISO 8601).
    pub start_time: Option<String>,
    /// End of the window (ISO 8601).
    pub end_time: Option<String>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
}

pub struct Audit<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Audit<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListAuditLogsParams) -> Result<Value, ClientError> {
        self.client.get("/audit-logs", params).await
    }
}
