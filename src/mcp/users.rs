use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::analytics::AnalyticsFilter;
use crate::portkey::users::{
    InviteIdParams, InviteUserParams, ListInvitesParams, ListUsersParams, UpdateUserParams,
    UserIdParams,
};

#[tool_router(router = users_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "List all users in the Portkey organisation, with optional role/email filters and pagination.")]
    async fn list_all_users(
        &self,
        Parameters(params): Parameters<ListUsersParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(self.client.users().list(&params).await, "fetching users")
    }

    #[tool(description = "Get a single user by ID.")]
    async fn get_user(
        &self,
        Parameters(params): Parameters<UserIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.user_id, "user_id")?;
        respond(self.client.users().get(&params.user_id).await, "fetching user")
    }

    #[tool(description = "Change a user's organisation role (admin or member).")]
    async fn update_user(
        &self,
        Parameters(params): Parameters<UpdateUserParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.user_id, "user_id")?;
        respond(self.client.users().update(&params).await, "updating user")
    }

    #[tool(description = "Remove a user from the organisation.")]
    async fn delete_user(
        &self,
        Parameters(params): Parameters<UserIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.user_id, "user_id")?;
        respond(self.client.users().delete(&params.user_id).await, "deleting user")
    }

    #[tool(description = "Invite a user to the organisation and optionally to workspaces, minting a workspace API key if requested.")]
    async fn invite_user(
        &self,
        Parameters(params): Parameters<InviteUserParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.email, "email")?;
        respond(self.client.users().invite(&params).await, "inviting user")
    }

    #[tool(description = "List pending and past user invites.")]
    async fn list_user_invites(
        &self,
        Parameters(params): Parameters<ListInvitesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.users().list_invites(&params).await,
            "fetching user invites",
        )
    }

    #[tool(description = "Get a single user invite by ID.")]
    async fn get_user_invite(
        &self,
        Parameters(params): Parameters<InviteIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.invite_id, "invite_id")?;
        respond(
            self.client.users().get_invite(&params.invite_id).await,
            "fetching user invite",
        )
    }

    #[tool(description = "Revoke a pending user invite.")]
    async fn delete_user_invite(
        &self,
        Parameters(params): Parameters<InviteIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.invite_id, "invite_id")?;
        respond(
            self.client.users().delete_invite(&params.invite_id).await,
            "deleting user invite",
        )
    }

    #[tool(description = "Resend the email for a pending user invite.")]
    async fn resend_user_invite(
        &self,
        Parameters(params): Parameters<InviteIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.invite_id, "invite_id")?;
        respond(
            self.client.users().resend_invite(&params.invite_id).await,
            "resending user invite",
        )
    }

    #[tool(description = "Per-user request counts and cost over a time window (ISO 8601 bounds required).")]
    async fn get_user_stats(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.users().grouped_stats(&params).await,
            "fetching user statistics",
        )
    }
}
