use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::keys::{
    ApiKeyIdParams, CreateApiKeyParams, CreateVirtualKeyParams, ListApiKeysParams,
    ListVirtualKeysParams, UpdateApiKeyParams, UpdateVirtualKeyParams, VirtualKeySlugParams,
};

#[tool_router(router = keys_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List virtual keys with their usage and rate limits.")]
    async fn list_virtual_keys(
        &self,
        Parameters(params): Parameters<ListVirtualKeysParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.keys().list_virtual(&params).await,
            "fetching virtual keys",
        )
    }

    #[tool(description = "Get a virtual key by slug.")]
    async fn get_virtual_key(
        &self,
        Parameters(params): Parameters<VirtualKeySlugParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.keys().get_virtual(&params.slug).await,
            "fetching virtual key",
        )
    }

    #[tool(description = "Create a virtual key that stores a provider credential.")]
    async fn create_virtual_key(
        &self,
        Parameters(params): Parameters<CreateVirtualKeyParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        require(&params.provider, "provider")?;
        respond(
            self.client.keys().create_virtual(&params).await,
            "creating virtual key",
        )
    }

    #[tool(description = "Update a virtual key's name, credential, note or limits.")]
    async fn update_virtual_key(
        &self,
        Parameters(params): Parameters<UpdateVirtualKeyParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.keys().update_virtual(&params).await,
            "updating virtual key",
        )
    }

    #[tool(description = "Delete a virtual key.")]
    async fn delete_virtual_key(
        &self,
        Parameters(params): Parameters<VirtualKeySlugParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.slug, "slug")?;
        respond(
            self.client.keys().delete_virtual(&params.slug).await,
            "deleting virtual key",
        )
    }

    #[tool(description = "List organisation and workspace API keys.")]
    async fn list_api_keys(
        &self,
        Parameters(params): Parameters<ListApiKeysParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(self.client.keys().list_api(&params).await, "fetching API keys")
    }

    #[tool(description = "Get an API key by ID.")]
    async fn get_api_key(
        &self,
        Parameters(params): Parameters<ApiKeyIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.id, "id")?;
        respond(self.client.keys().get_api(&params.id).await, "fetching API key")
    }

    #[tool(description = "Create an API key. `type` is organisation or workspace, `sub_type` is user or service.")]
    async fn create_api_key(
        &self,
        Parameters(params): Parameters<CreateApiKeyParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.kind, "type")?;
        require(&params.sub_type, "sub_type")?;
        respond(self.client.keys().create_api(&params).await, "creating API key")
    }

    #[tool(description = "Update an API key's name, scopes, limits or expiry.")]
    async fn update_api_key(
        &self,
        Parameters(params): Parameters<UpdateApiKeyParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.id, "id")?;
        respond(self.client.keys().update_api(&params).await, "updating API key")
    }

    #[tool(description = "Delete an API key.")]
    async fn delete_api_key(
        &self,
        Parameters(params): Parameters<ApiKeyIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.id, "id")?;
        respond(self.client.keys().delete_api(&params.id).await, "deleting API key")
    }
}
