use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::traces::{CreateFeedbackParams, TraceIdParams, UpdateFeedbackParams};

#[tool_router(router = traces_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "Attach feedback (a score with optional weight and metadata) to a trace.")]
    async fn create_feedback(
        &self,
        Parameters(params): Parameters<CreateFeedbackParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.trace_id, "trace_id")?;
        respond(
            self.client.traces().create_feedback(&params).await,
            "creating feedback",
        )
    }

    #[tool(description = "Update existing feedback.")]
    async fn update_feedback(
        &self,
        Parameters(params): Parameters<UpdateFeedbackParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.feedback_id, "feedback_id")?;
        respond(
            self.client.traces().update_feedback(&params).await,
            "updating feedback",
        )
    }

    #[tool(description = "Get a trace: request, response, spans, cost and tokens.")]
    async fn get_trace(
        &self,
        Parameters(params): Parameters<TraceIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.trace_id, "trace_id")?;
        respond(
            self.client.traces().get(&params.trace_id).await,
            "fetching trace",
        )
    }
}
