use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::partials::{
    CreatePartialParams, ListPartialsParams, PartialIdParams, PublishPartialParams,
    UpdatePartialParams,
};

#[tool_router(router = partials_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List prompt partials (reusable template fragments).")]
    async fn list_prompt_partials(
        &self,
        Parameters(params): Parameters<ListPartialsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.partials().list(&params).await,
            "fetching prompt partials",
        )
    }

    #[tool(description = "Create a prompt partial.")]
    async fn create_prompt_partial(
        &self,
        Parameters(params): Parameters<CreatePartialParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        respond(
            self.client.partials().create(&params).await,
            "creating prompt partial",
        )
    }

    #[tool(description = "Get a prompt partial.")]
    async fn get_prompt_partial(
        &self,
        Parameters(params): Parameters<PartialIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.partial_id, "partial_id")?;
        respond(
            self.client.partials().get(&params.partial_id).await,
            "fetching prompt partial",
        )
    }

    #[tool(description = "Update a prompt partial. Content changes create a new version.")]
    async fn update_prompt_partial(
        &self,
        Parameters(params): Parameters<UpdatePartialParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.partial_id, "partial_id")?;
        respond(
            self.client.partials().update(&params).await,
            "updating prompt partial",
        )
    }

    #[tool(description = "Delete a prompt partial.")]
    async fn delete_prompt_partial(
        &self,
        Parameters(params): Parameters<PartialIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.partial_id, "partial_id")?;
        respond(
            self.client.partials().delete(&params.partial_id).await,
            "deleting prompt partial",
        )
    }

    #[tool(description = "List every version of a prompt partial.")]
    async fn list_prompt_partial_versions(
        &self,
        Parameters(params): Parameters<PartialIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.partial_id, "partial_id")?;
        respond(
            self.client.partials().versions(&params.partial_id).await,
            "fetching prompt partial versions",
        )
    }

    #[tool(description = "Make a version the default one for a prompt partial.")]
    async fn publish_prompt_partial(
        &self,
        Parameters(params): Parameters<PublishPartialParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.partial_id, "partial_id")?;
        respond(
            self.client.partials().publish(&params).await,
            "publishing prompt partial",
        )
    }
}
