use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::labels::{CreateLabelParams, LabelIdParams, ListLabelsParams, UpdateLabelParams};

#[tool_router(router = labels_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List prompt labels.")]
    async fn list_labels(
        &self,
        Parameters(params): Parameters<ListLabelsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(self.client.labels().list(&params).await, "fetching labels")
    }

    #[tool(description = "Create a prompt label.")]
    async fn create_label(
        &self,
        Parameters(params): Parameters<CreateLabelParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        respond(self.client.labels().create(&params).await, "creating label")
    }

    #[tool(description = "Get a prompt label.")]
    async fn get_label(
        &self,
        Parameters(params): Parameters<LabelIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.label_id, "label_id")?;
        respond(
            self.client.labels().get(&params.label_id).await,
            "fetching label",
        )
    }

    #[tool(description = "Update a prompt label.")]
    async fn update_label(
        &self,
        Parameters(params): Parameters<UpdateLabelParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.label_id, "label_id")?;
        respond(self.client.labels().update(&params).await, "updating label")
    }

    #[tool(description = "Delete a prompt label.")]
    async fn delete_label(
        &self,
        Parameters(params): Parameters<LabelIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.label_id, "label_id")?;
        respond(
            self.client.labels().delete(&params.label_id).await,
            "deleting label",
        )
    }
}
