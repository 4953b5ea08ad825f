//! MCP server exposing the Portkey admin API as tools.
//!
//! Each REST family lives in its own module with a dedicated tool router;
//! [`PortkeyMcpServer::new`] merges them into the single router rmcp
//! dispatches on. Tools return pretty-printed JSON on success and a text
//! error result (`Error <verb>ing <resource>: <message>`) when the upstream
//! call fails, so a failing call never tears down the session.

mod analytics;
mod audit;
mod collections;
mod configs;
mod guardrails;
mod integrations;
mod keys;
mod labels;
mod limits;
mod logs;
mod partials;
mod prompts;
mod providers;
mod traces;
mod users;
mod workspaces;

use std::sync::Arc;

use rmcp::{
    handler::server::router::tool::ToolRouter,
    model::*,
    tool_handler,
    ServerHandler,
};
use serde::Serialize;

use crate::portkey::{ClientError, PortkeyClient};

#[derive(Clone)]
pub struct PortkeyMcpServer {
    client: Arc<PortkeyClient>,
    tool_router: ToolRouter<PortkeyMcpServer>,
}

impl PortkeyMcpServer {
    pub fn new(client: Arc<PortkeyClient>) -> Self {
        let tool_router = Self::users_router()
            + Self::workspaces_router()
            + Self::configs_router()
            + Self::keys_router()
            + Self::collections_router()
            + Self::prompts_router()
            + Self::analytics_router()
            + Self::guardrails_router()
            + Self::limits_router()
            + Self::audit_router()
            + Self::labels_router()
            + Self::partials_router()
            + Self::traces_router()
            + Self::logs_router()
            + Self::providers_router()
            + Self::integrations_router();
        Self {
            client,
            tool_router,
        }
    }

    pub fn client(&self) -> &PortkeyClient {
        &self.client
    }

    /// Names of every registered tool, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for PortkeyMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "portkey-mcp".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "Portkey admin API over MCP: users, workspaces, configs, keys, prompts, \
                     analytics, guardrails, limits, logs and integrations."
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tools map one-to-one onto the Portkey admin API. List tools return the raw \
                 upstream JSON. Use migrate_prompt to sync a template into a collection \
                 idempotently, promote_prompt to copy it between environments, and \
                 validate_completion_metadata before run_prompt_completion."
                    .to_string(),
            ),
        }
    }
}

/// Turn an upstream result into a tool result.
///
/// `action` names what was attempted, e.g. `"fetching users"`; it prefixes the
/// error text shown to the client.
pub(crate) fn respond<T: Serialize>(
    result: Result<T, ClientError>,
    action: &str,
) -> Result<CallToolResult, ErrorData> {
    match result {
        Ok(value) => json_result(&value),
        Err(e) => {
            tracing::warn!(action, status = ?e.status(), error = %e, "tool call failed");
            Ok(CallToolResult::error(vec![Content::text(format!(
                "Error {action}: {e}"
            ))]))
        }
    }
}

pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        ErrorData::internal_error(format!("failed to serialize result: {e}"), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Reject blank identifiers before they turn into `/resource/` URLs.
pub(crate) fn require(value: &str, field: &str) -> Result<(), ErrorData> {
    if value.trim().is_empty() {
        return Err(ErrorData::invalid_params(
            format!("{field} must not be empty"),
            None,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, DEFAULT_TIMEOUT};
    use serde_json::json;

    fn server() -> PortkeyMcpServer {
        let config = ApiConfig::new(Some("pk-test".into()), None, DEFAULT_TIMEOUT).unwrap();
        PortkeyMcpServer::new(Arc::new(PortkeyClient::new(&config).unwrap()))
    }

    fn text_of(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| c.as_text().map(|t| t.text.clone()))
            .collect()
    }

    #[test]
    fn success_is_pretty_json() {
        let result = respond::<serde_json::Value>(Ok(json!({"id": "u-1"})), "fetching user").unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "{\n  \"id\": \"u-1\"\n}");
    }

    #[test]
    fn upstream_failure_becomes_error_text() {
        let err = ClientError::Http {
            status: 404,
            message: "user not found".into(),
        };
        let result = respond::<serde_json::Value>(Err(err), "fetching user").unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error fetching user: user not found");
    }

    #[test]
    fn blank_identifier_is_invalid_params() {
        let err = require("  ", "user_id").unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(require("u-1", "user_id").is_ok());
    }

    #[test]
    fn every_family_registers_tools() {
        let names = server().tool_names();
        for expected in [
            "list_all_users",
            "invite_user",
            "get_user_stats",
            "list_workspaces",
            "remove_workspace_member",
            "list_configs",
            "list_config_versions",
            "create_virtual_key",
            "create_api_key",
            "list_collections",
            "migrate_prompt",
            "promote_prompt",
            "validate_completion_metadata",
            "run_prompt_completion",
            "get_cost_analytics",
            "get_feedback_models_analytics",
            "get_metadata_groups",
            "list_guardrails",
            "list_usage_limits",
            "delete_rate_limit",
            "list_audit_logs",
            "list_labels",
            "publish_prompt_partial",
            "create_feedback",
            "get_trace",
            "insert_log",
            "download_log_export",
            "list_providers",
            "update_integration_workspaces",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing tool {expected}");
        }
    }

    #[test]
    fn no_tool_name_is_registered_twice() {
        // Routers are keyed by name, so a clash would silently drop a tool.
        assert_eq!(server().tool_names().len(), 126);
    }

    #[test]
    fn server_info_enables_tools_only() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "portkey-mcp");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
    }
}
