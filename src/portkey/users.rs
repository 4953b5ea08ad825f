use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::analytics::AnalyticsFilter;
use super::{segment, ClientError, PortkeyClient};

/// Organisation-level role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    Admin,
    Member,
}

/// Workspace-level role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceRole {
    Admin,
    Member,
    Manager,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListUsersParams {
    /// Number of users per page.
    pub page_size: Option<u32>,
    /// Zero-based page index.
    pub current_page: Option<u32>,
    /// Only return users with this organisation role.
    pub role: Option<String>,
    /// Only return the user with this email address.
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UserIdParams {
    /// The user's ID.
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateUserParams {
    /// The user's ID.
    #[serde(skip_serializing)]
    pub user_id: String,
    /// New organisation role.
    pub role: OrgRole,
}

/// Workspace membership granted as part of an invite.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InviteWorkspace {
    /// Workspace ID.
    pub id: String,
    /// Role inside that workspace.
    pub role: WorkspaceRole,
}

/// Optional workspace API key minted for the invited user.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkspaceApiKeyDetails {
    pub name: Option<String>,
    /// Expiry timestamp (ISO 8601).
    pub expiry: Option<String>,
    pub metadata: Option<std::collections::HashMap<String, String>>,
    /// Scopes granted to the key.
    pub scopes: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InviteUserParams {
    /// Email address of the person to invite.
    pub email: String,
    /// Organisation role for the invited user.
    pub role: OrgRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Workspaces the user joins once the invite is accepted.
    pub workspaces: Vec<InviteWorkspace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_api_key_details: Option<WorkspaceApiKeyDetails>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListInvitesParams {
    /// Filter by invitee email.
    pub email: Option<String>,
    /// Filter by invite status (e.g. `pending`, `accepted`, `expired`).
    pub status: Option<String>,
    pub page_size: Option<u32>,
    pub current_page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InviteIdParams {
    /// The invite's ID.
    pub invite_id: String,
}

/// Users and invites (`/admin/users`).
pub struct Users<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Users<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListUsersParams) -> Result<Value, ClientError> {
        self.client.get("/admin/users", params).await
    }

    pub async fn get(&self, user_id: &str) -> Result<Value, ClientError> {
        self.client
            .get(&format!("/admin/users/{}", segment(user_id)), &())
            .await
    }

    pub async fn update(&self, params: &UpdateUserParams) -> Result<Value, ClientError> {
        self.client
            .put(&format!("/admin/users/{}", segment(&params.user_id)), Some(params))
            .await
    }

    pub async fn delete(&self, user_id: &str) -> Result<Value, ClientError> {
        self.client
            .delete(&format!("/admin/users/{}", segment(user_id)))
            .await
    }

    pub async fn invite(&self, params: &InviteUserParams) -> Result<Value, ClientError> {
        self.client.post("/admin/users/invites", Some(params)).await
    }

    pub async fn list_invites(&self, params: &ListInvitesParams) -> Result<Value, ClientError> {
        self.client.get("/admin/users/invites", params).await
    }

    pub async fn get_invite(&self, invite_id: &str) -> Result<Value, ClientError> {
        self.client
            .get(&format!("/admin/users/invites/{}", segment(invite_id)), &())
            .await
    }

    pub async fn delete_invite(&self, invite_id: &str) -> Result<Value, ClientError> {
        self.client
            .delete(&format!("/admin/users/invites/{}", segment(invite_id)))
            .await
    }

    pub async fn resend_invite(&self, invite_id: &str) -> Result<Value, ClientError> {
        self.client
            .post::<_, ()>(
                &format!("/admin/users/invites/{}/resend", segment(invite_id)),
                None,
            )
            .await
    }

    /// Per-user request and cost totals over a time window.
    pub async fn grouped_stats(&self, filter: &AnalyticsFilter) -> Result<Value, ClientError> {
        self.client.get("/analytics/groups/users", filter).await
    }
}
