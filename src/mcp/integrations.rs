use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::integrations::{
    CreateIntegrationParams, IntegrationSlugParams, ListIntegrationsParams,
    UpdateIntegrationModelsParams, UpdateIntegrationParams, UpdateIntegrationWorkspacesParams,
};

#[tool_router(router = integrations_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List provider integrations.")]
    async fn list_integrations(
        &self,
        Parameters(params): Parameters<ListIntegrationsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.integrations().list(&params).await,
            "fetching integrations",
        )
    }

    #[tool(description = "Create a provider integration holding organisation-level credentials.")]
    async fn create_integration(
        &self,
        Parameters(params): Parameters<CreateIntegrationParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        require(&params.ai_provider_id, "ai_provider_id")?;
        respond(
            self.client.integrations().create(&params).await,
            "creating integration",
        )
    }

    #[tool(description = "Get a provider integration by slug.")]
    async fn get_integration(
        &self,
        Parameters(params): Parameters<IntegrationSlugParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.integrations().get(&params.slug).await,
            "fetching integration",
        )
    }

    #[tool(description = "Update a provider integration.")]
    async fn update_integration(
        &self,
        Parameters(params): Parameters<UpdateIntegrationParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.integrations().update(&params).await,
            "updating integration",
        )
    }

    #[tool(description = "Delete a provider integration.")]
    async fn delete_integration(
        &self,
        Parameters(params): Parameters<IntegrationSlugParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.integrations().delete(&params.slug).await,
            "deleting integration",
        )
    }

    #[tool(description = "List the models enabled on an integration.")]
    async fn list_integration_models(
        &self,
        Parameters(params): Parameters<IntegrationSlugParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.integrations().models(&params.slug).await,
            "fetching integration models",
        )
    }

    #[tool(description = "Enable or disable models on an integration.")]
    async fn update_integration_models(
        &self,
        Parameters(params): Parameters<UpdateIntegrationModelsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.integrations().update_models(&params).await,
            "updating integration models",
        )
    }

    #[tool(description = "List the workspaces that can use an integration.")]
    async fn list_integration_workspaces(
        &self,
        Parameters(params): Parameters<IntegrationSlugParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.integrations().workspaces(&params.slug).await,
            "fetching integration workspaces",
        )
    }

    #[tool(description = "Grant or revoke workspace access to an integration.")]
    async fn update_integration_workspaces(
        &self,
        Parameters(params): Parameters<UpdateIntegrationWorkspacesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.integrations().update_workspaces(&params).await,
            "updating integration workspaces",
        )
    }
}
