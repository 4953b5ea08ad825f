use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::providers::{
    CreateProviderParams, ListProvidersParams, ProviderSlugParams, UpdateProviderParams,
};

#[tool_router(router = providers_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List AI providers available to a workspace.")]
    async fn list_providers(
        &self,
        Parameters(params): Parameters<ListProvidersParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.providers().list(&params).await,
            "fetching providers",
        )
    }

    #[tool(description = "Create a workspace provider backed by an integration.")]
    async fn create_provider(
        &self,
        Parameters(params): Parameters<CreateProviderParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        require(&params.integration_id, "integration_id")?;
        respond(
            self.client.providers().create(&params).await,
            "creating provider",
        )
    }

    #[tool(description = "Get a provider by slug.")]
    async fn get_provider(
        &self,
        Parameters(params): Parameters<ProviderSlugParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.providers().get(&params.slug).await,
            "fetching provider",
        )
    }

    #[tool(description = "Update a provider's name, note, limits or expiry.")]
    async fn update_provider(
        &self,
        Parameters(params): Parameters<UpdateProviderParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.providers().update(&params).await,
            "updating provider",
        )
    }

    #[tool(description = "Delete a provider.")]
    async fn delete_provider(
        &self,
        Parameters(params): Parameters<ProviderSlugParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.providers().delete(&params.slug).await,
            "deleting provider",
        )
    }
}
