use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{respond, PortkeyMcpServer};
use crate::portkey::audit::ListAuditLogsParams;

#[tool_router(router = audit_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List audit log entries (who changed what, and when), with actor, resource and time filters.")]
    async fn list_audit_logs(
        &self,
        Parameters(params): Parameters<ListAuditLogsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(self.client.audit().list(&params).await, "fetching audit logs")
    }
}
