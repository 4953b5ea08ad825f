use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::users::WorkspaceRole;
use super::{segment, ClientError, PortkeyClient};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListWorkspacesParams {
    pub page_size: Option<u32>,
    pub current_page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkspaceIdParams {
    /// Workspace ID or slug.
    pub workspace_id: String,
}

/// Workspace defaults applied to requests made inside it.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkspaceDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateWorkspaceParams {
    /// Display name.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<WorkspaceDefaults>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateWorkspaceParams {
    /// Workspace ID or slug.
    #[serde(skip_serializing)]
    pub workspace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<WorkspaceDefaults>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkspaceMember {
    /// User ID.
    pub id: String,
    pub role: WorkspaceRole,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddWorkspaceMembersParams {
    #[serde(skip_serializing)]
    pub workspace_id: String,
    /// Users to add, each with a workspace role.
    pub users: Vec<WorkspaceMember>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListWorkspaceMembersParams {
    #[serde(skip_serializing)]
    pub workspace_id: String,
    pub page_size: Option<u32>,
    pub current_page: Option<u32>,
    /// Filter by workspace role.
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkspaceMemberParams {
    pub workspace_id: String,
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateWorkspaceMemberParams {
    #[serde(skip_serializing)]
    pub workspace_id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub role: WorkspaceRole,
}

/// Workspaces and their members (`/admin/workspaces`).
pub struct Workspaces<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Workspaces<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListWorkspacesParams) -> Result<Value, ClientError> {
        self.client.get("/admin/workspaces", params).await
    }

    pub async fn get(&self, workspace_id: &str) -> Result<Value, ClientError> {
        self.client.get(&path(workspace_id), &()).await
    }

    pub async fn create(&self, params: &CreateWorkspaceParams) -> Result<Value, ClientError> {
        self.client.post("/admin/workspaces", Some(params)).await
    }

    pub async fn update(&self, params: &UpdateWorkspaceParams) -> Result<Value, ClientError> {
        self.client
            .put(&path(&params.workspace_id), Some(params))
            .await
    }

    pub async fn delete(&self, workspace_id: &str) -> Result<Value, ClientError> {
        self.client.delete(&path(workspace_id)).await
    }

    pub async fn add_members(&self, params: &AddWorkspaceMembersParams) -> Result<Value, ClientError> {
        self.client
            .post(&format!("{}/users", path(&params.workspace_id)), Some(params))
            .await
    }

    pub async fn list_members(&self, params: &ListWorkspaceMembersParams) -> Result<Value, ClientError> {
        self.client
            .get(&format!("{}/users", path(&params.workspace_id)), params)
            .await
    }

    pub async fn get_member(&self, workspace_id: &str, user_id: &str) -> Result<Value, ClientError> {
        self.client
            .get(&member_path(workspace_id, user_id), &())
            .await
    }

    pub async fn update_member(&self, params: &UpdateWorkspaceMemberParams) -> Result<Value, ClientError> {
        self.client
            .put(&member_path(&params.workspace_id, &params.user_id), Some(params))
            .await
    }

    pub async fn remove_member(&self, workspace_id: &str, user_id: &str) -> Result<Value, ClientError> {
        self.client
            .delete(&member_path(workspace_id, user_id))
            .await
    }
}

fn path(workspace_id: &str) -> String {
    format!("/admin/workspaces/{}", segment(workspace_id))
}

fn member_path(workspace_id: &str, user_id: &str) -> String {
    format!("{}/users/{}", path(workspace_id), segment(user_id))
}
