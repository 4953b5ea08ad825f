use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::limits::{
    CreateLimitParams, LimitIdParams, LimitKind, ListLimitsParams, UpdateLimitParams,
};

#[tool_router(router = limits_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List usage limit policies (spend or token caps per group).")]
    async fn list_usage_limits(
        &self,
        Parameters(params): Parameters<ListLimitsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.limits().list(LimitKind::Usage, &params).await,
            "fetching usage limits",
        )
    }

    #[tool(description = "Get a usage limit policy.")]
    async fn get_usage_limit(
        &self,
        Parameters(params): Parameters<LimitIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.id, "id")?;
        respond(
            self.client.limits().get(LimitKind::Usage, &params.id).await,
            "fetching usage limit",
        )
    }

    #[tool(description = "Create a usage limit policy.")]
    async fn create_usage_limit(
        &self,
        Parameters(params): Parameters<CreateLimitParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        respond(
            self.client.limits().create(LimitKind::Usage, &params).await,
            "creating usage limit",
        )
    }

    #[tool(description = "Update a usage limit policy, or reset accumulated usage for a group value.")]
    async fn update_usage_limit(
        &self,
        Parameters(params): Parameters<UpdateLimitParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.id, "id")?;
        respond(
            self.client.limits().update(LimitKind::Usage, &params).await,
            "updating usage limit",
        )
    }

    #[tool(description = "Delete a usage limit policy.")]
    async fn delete_usage_limit(
        &self,
        Parameters(params): Parameters<LimitIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.id, "id")?;
        respond(
            self.client.limits().delete(LimitKind::Usage, &params.id).await,
            "deleting usage limit",
        )
    }

    #[tool(description = "List rate limit policies (requests or tokens per minute/hour/day).")]
    async fn list_rate_limits(
        &self,
        Parameters(params): Parameters<ListLimitsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.limits().list(LimitKind::Rate, &params).await,
            "fetching rate limits",
        )
    }

    #[tool(description = "Get a rate limit policy.")]
    async fn get_rate_limit(
        &self,
        Parameters(params): Parameters<LimitIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.id, "id")?;
        respond(
            self.client.limits().get(LimitKind::Rate, &params.id).await,
            "fetching rate limit",
        )
    }

    #[tool(description = "Create a rate limit policy.")]
    async fn create_rate_limit(
        &self,
        Parameters(params): Parameters<CreateLimitParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        respond(
            self.client.limits().create(LimitKind::Rate, &params).await,
            "creating rate limit",
        )
    }

    #[tool(description = "Update a rate limit policy.")]
    async fn update_rate_limit(
        &self,
        Parameters(params): Parameters<UpdateLimitParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.id, "id")?;
        respond(
            self.client.limits().update(LimitKind::Rate, &params).await,
            "updating rate limit",
        )
    }

    #[tool(description = "Delete a rate limit policy.")]
    async fn delete_rate_limit(
        &self,
        Parameters(params): Parameters<LimitIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.id, "id")?;
        respond(
            self.client.limits().delete(LimitKind::Rate, &params.id).await,
            "deleting rate limit",
        )
    }
}
