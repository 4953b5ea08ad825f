use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::collections::{
    CollectionIdParams, CreateCollectionParams, ListCollectionsParams, UpdateCollectionParams,
};

#[tool_router(router = collections_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List prompt collections. Collections group prompts per app.")]
    async fn list_collections(
        &self,
        Parameters(params): Parameters<ListCollectionsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.collections().list(&params).await,
            "fetching collections",
        )
    }

    #[tool(description = "Create a prompt collection.")]
    async fn create_collection(
        &self,
        Parameters(params): Parameters<CreateCollectionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        respond(
            self.client.collections().create(&params).await,
            "creating collection",
        )
    }

    #[tool(description = "Get a prompt collection by ID or slug.")]
    async fn get_collection(
        &self,
        Parameters(params): Parameters<CollectionIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.collection_id, "collection_id")?;
        respond(
            self.client.collections().get(&params.collection_id).await,
            "fetching collection",
        )
    }

    #[tool(description = "Rename a prompt collection.")]
    async fn update_collection(
        &self,
        Parameters(params): Parameters<UpdateCollectionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.collection_id, "collection_id")?;
        respond(
            self.client.collections().update(&params).await,
            "updating collection",
        )
    }

    #[tool(description = "Delete a prompt collection.")]
    async fn delete_collection(
        &self,
        Parameters(params): Parameters<CollectionIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.collection_id, "collection_id")?;
        respond(
            self.client.collections().delete(&params.collection_id).await,
            "deleting collection",
        )
    }
}
