use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::workspaces::{
    AddWorkspaceMembersParams, CreateWorkspaceParams, ListWorkspaceMembersParams,
    ListWorkspacesParams, UpdateWorkspaceMemberParams, UpdateWorkspaceParams,
    WorkspaceIdParams, WorkspaceMemberParams,
};

#[tool_router(router = workspaces_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List workspaces in the organisation.")]
    async fn list_workspaces(
        &self,
        Parameters(params): Parameters<ListWorkspacesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.workspaces().list(&params).await,
            "fetching workspaces",
        )
    }

    #[tool(description = "Get a workspace, including its members and defaults.")]
    async fn get_workspace(
        &self,
        Parameters(params): Parameters<WorkspaceIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.workspace_id, "workspace_id")?;
        respond(
            self.client.workspaces().get(&params.workspace_id).await,
            "fetching workspace",
        )
    }

    #[tool(description = "Create a workspace.")]
    async fn create_workspace(
        &self,
        Parameters(params): Parameters<CreateWorkspaceParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        respond(
            self.client.workspaces().create(&params).await,
            "creating workspace",
        )
    }

    #[tool(description = "Update a workspace's name, description or defaults.")]
    async fn update_workspace(
        &self,
        Parameters(params): Parameters<UpdateWorkspaceParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.workspace_id, "workspace_id")?;
        respond(
            self.client.workspaces().update(&params).await,
            "updating workspace",
        )
    }

    #[tool(description = "Delete a workspace.")]
    async fn delete_workspace(
        &self,
        Parameters(params): Parameters<WorkspaceIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.workspace_id, "workspace_id")?;
        respond(
            self.client.workspaces().delete(&params.workspace_id).await,
            "deleting workspace",
        )
    }

    #[tool(description = "Add users to a workspace with the given roles.")]
    async fn add_workspace_member(
        &self,
        Parameters(params): Parameters<AddWorkspaceMembersParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.workspace_id, "workspace_id")?;
        respond(
            self.client.workspaces().add_members(&params).await,
            "adding workspace member",
        )
    }

    #[tool(description = "List members of a workspace.")]
    async fn list_workspace_members(
        &self,
        Parameters(params): Parameters<ListWorkspaceMembersParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.workspace_id, "workspace_id")?;
        respond(
            self.client.workspaces().list_members(&params).await,
            "fetching workspace members",
        )
    }

    #[tool(description = "Get one member of a workspace.")]
    async fn get_workspace_member(
        &self,
        Parameters(params): Parameters<WorkspaceMemberParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.workspace_id, "workspace_id")?;
        require(&params.user_id, "user_id")?;
        respond(
            self.client
                .workspaces()
                .get_member(&params.workspace_id, &params.user_id)
                .await,
            "fetching workspace member",
        )
    }

    #[tool(description = "Change a member's role inside a workspace.")]
    async fn update_workspace_member(
        &self,
        Parameters(params): Parameters<UpdateWorkspaceMemberParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.workspace_id, "workspace_id")?;
        require(&params.user_id, "user_id")?;
        respond(
            self.client.workspaces().update_member(&params).await,
            "updating workspace member",
        )
    }

    #[tool(description = "Remove a member from a workspace.")]
    async fn remove_workspace_member(
        &self,
        Parameters(params): Parameters<WorkspaceMemberParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.workspace_id, "workspace_id")?;
        require(&params.user_id, "user_id")?;
        respond(
            self.client
                .workspaces()
                .remove_member(&params.workspace_id, &params.user_id)
                .await,
            "removing workspace member",
        )
    }
}
