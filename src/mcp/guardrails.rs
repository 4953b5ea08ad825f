use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::guardrails::{
    CreateGuardrailParams, GuardrailIdParams, ListGuardrailsParams, UpdateGuardrailParams,
};

#[tool_router(router = guardrails_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List guardrails.")]
    async fn list_guardrails(
        &self,
        Parameters(params): Parameters<ListGuardrailsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.guardrails().list(&params).await,
            "fetching guardrails",
        )
    }

    #[tool(description = "Get a guardrail with its checks and actions.")]
    async fn get_guardrail(
        &self,
        Parameters(params): Parameters<GuardrailIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.guardrail_id, "guardrail_id")?;
        respond(
            self.client.guardrails().get(&params.guardrail_id).await,
            "fetching guardrail",
        )
    }

    #[tool(description = "Create a guardrail from a list of checks and the actions taken on failure.")]
    async fn create_guardrail(
        &self,
        Parameters(params): Parameters<CreateGuardrailParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        respond(
            self.client.guardrails().create(&params).await,
            "creating guardrail",
        )
    }

    #[tool(description = "Update a guardrail's name, checks or actions.")]
    async fn update_guardrail(
        &self,
        Parameters(params): Parameters<UpdateGuardrailParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.guardrail_id, "guardrail_id")?;
        respond(
            self.client.guardrails().update(&params).await,
            "updating guardrail",
        )
    }

    #[tool(description = "Delete a guardrail.")]
    async fn delete_guardrail(
        &self,
        Parameters(params): Parameters<GuardrailIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.guardrail_id, "guardrail_id")?;
        respond(
            self.client.guardrails().delete(&params.guardrail_id).await,
            "deleting guardrail",
        )
    }
}
