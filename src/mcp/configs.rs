use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::configs::{
    ConfigSlugParams, CreateConfigParams, ListConfigsParams, UpdateConfigParams,
};

#[tool_router(router = configs_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List gateway configs.")]
    async fn list_configs(
        &self,
        Parameters(params): Parameters<ListConfigsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(self.client.configs().list(&params).await, "fetching configs")
    }

    #[tool(description = "Get a gateway config by slug, including retry, cache, strategy and targets.")]
    async fn get_config(
        &self,
        Parameters(params): Parameters<ConfigSlugParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(self.client.configs().get(&params.slug).await, "fetching config")
    }

    #[tool(description = "Create a gateway config.")]
    async fn create_config(
        &self,
        Parameters(params): Parameters<CreateConfigParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        respond(self.client.configs().create(&params).await, "creating config")
    }

    #[tool(description = "Update a gateway config. Each update creates a new config version.")]
    async fn update_config(
        &self,
        Parameters(params): Parameters<UpdateConfigParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(self.client.configs().update(&params).await, "updating config")
    }

    #[tool(description = "Delete a gateway config.")]
    async fn delete_config(
        &self,
        Parameters(params): Parameters<ConfigSlugParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(self.client.configs().delete(&params.slug).await, "deleting config")
    }

    #[tool(description = "List the version history of a gateway config.")]
    async fn list_config_versions(
        &self,
        Parameters(params): Parameters<ConfigSlugParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.configs().versions(&params.slug).await,
            "fetching config versions",
        )
    }
}
