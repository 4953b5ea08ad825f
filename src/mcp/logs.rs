use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::logs::{
    CreateLogExportParams, ExportIdParams, InsertLogParams, ListLogExportsParams,
    UpdateLogExportParams,
};

#[tool_router(router = logs_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "Insert a custom log entry for a request made outside the gateway.")]
    async fn insert_log(
        &self,
        Parameters(params): Parameters<InsertLogParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(self.client.logs().insert(&params).await, "inserting log")
    }

    #[tool(description = "Create a log export job from filters and the columns to include.")]
    async fn create_log_export(
        &self,
        Parameters(params): Parameters<CreateLogExportParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.logs().create_export(&params).await,
            "creating log export",
        )
    }

    #[tool(description = "List log export jobs.")]
    async fn list_log_exports(
        &self,
        Parameters(params): Parameters<ListLogExportsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.logs().list_exports(&params).await,
            "fetching log exports",
        )
    }

    #[tool(description = "Get a log export job and its status.")]
    async fn get_log_export(
        &self,
        Parameters(params): Parameters<ExportIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.export_id, "export_id")?;
        respond(
            self.client.logs().get_export(&params.export_id).await,
            "fetching log export",
        )
    }

    #[tool(description = "Update a log export job's filters or columns before it starts.")]
    async fn update_log_export(
        &self,
        Parameters(params): Parameters<UpdateLogExportParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.export_id, "export_id")?;
        respond(
            self.client.logs().update_export(&params).await,
            "updating log export",
        )
    }

    #[tool(description = "Start a log export job.")]
    async fn start_log_export(
        &self,
        Parameters(params): Parameters<ExportIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.export_id, "export_id")?;
        respond(
            self.client.logs().start_export(&params.export_id).await,
            "starting log export",
        )
    }

    #[tool(description = "Cancel a running log export job.")]
    async fn cancel_log_export(
        &self,
        Parameters(params): Parameters<ExportIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.export_id, "export_id")?;
        respond(
            self.client.logs().cancel_export(&params.export_id).await,
            "cancelling log export",
        )
    }

    #[tool(description = "Get the download URL of a finished log export.")]
    async fn download_log_export(
        &self,
        Parameters(params): Parameters<ExportIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.export_id, "export_id")?;
        respond(
            self.client.logs().download_export(&params.export_id).await,
            "downloading log export",
        )
    }
}
