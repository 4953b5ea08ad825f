use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::prompts::{
    validate_billing_metadata, BillingMetadata, CreatePromptParams, ListPromptsParams,
    MigratePromptParams, PromotePromptParams, PromptIdParams, PromptVersionParams,
    PublishPromptParams, RenderPromptParams, RunCompletionParams, UpdatePromptParams,
};

// `get_prompt`/`list_prompts` would shadow ServerHandler methods, hence the renames.
#[tool_router(router = prompts_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "Create a prompt template in a collection.")]
    async fn create_prompt(
        &self,
        Parameters(params): Parameters<CreatePromptParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        require(&params.collection_id, "collection_id")?;
        respond(self.client.prompts().create(&params).await, "creating prompt")
    }

    #[tool(
        name = "list_prompts",
        description = "List prompt templates, optionally filtered by collection, workspace or name."
    )]
    async fn list_prompt_templates(
        &self,
        Parameters(params): Parameters<ListPromptsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(self.client.prompts().list(&params).await, "fetching prompts")
    }

    #[tool(
        name = "get_prompt",
        description = "Get a prompt template with its current version."
    )]
    async fn get_prompt_template(
        &self,
        Parameters(params): Parameters<PromptIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.prompt_id, "prompt_id")?;
        respond(
            self.client.prompts().get(&params.prompt_id).await,
            "fetching prompt",
        )
    }

    #[tool(description = "Update a prompt template. Template changes create a new version.")]
    async fn update_prompt(
        &self,
        Parameters(params): Parameters<UpdatePromptParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.prompt_id, "prompt_id")?;
        respond(self.client.prompts().update(&params).await, "updating prompt")
    }

    #[tool(description = "Delete a prompt template.")]
    async fn delete_prompt(
        &self,
        Parameters(params): Parameters<PromptIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.prompt_id, "prompt_id")?;
        respond(
            self.client.prompts().delete(&params.prompt_id).await,
            "deleting prompt",
        )
    }

    #[tool(description = "List every version of a prompt template.")]
    async fn list_prompt_versions(
        &self,
        Parameters(params): Parameters<PromptIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.prompt_id, "prompt_id")?;
        respond(
            self.client.prompts().versions(&params.prompt_id).await,
            "fetching prompt versions",
        )
    }

    #[tool(description = "Get one version of a prompt template.")]
    async fn get_prompt_version(
        &self,
        Parameters(params): Parameters<PromptVersionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.prompt_id, "prompt_id")?;
        require(&params.version_id, "version_id")?;
        respond(
            self.client
                .prompts()
                .version(&params.prompt_id, &params.version_id)
                .await,
            "fetching prompt version",
        )
    }

    #[tool(description = "Make a version the default one served for a prompt.")]
    async fn publish_prompt(
        &self,
        Parameters(params): Parameters<PublishPromptParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.prompt_id, "prompt_id")?;
        respond(
            self.client.prompts().publish(&params).await,
            "publishing prompt",
        )
    }

    #[tool(description = "Render a prompt template with variables, returning the final messages without calling a model.")]
    async fn render_prompt(
        &self,
        Parameters(params): Parameters<RenderPromptParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.prompt_id, "prompt_id")?;
        respond(
            self.client.prompts().render(&params).await,
            "rendering prompt",
        )
    }

    #[tool(description = "Run a completion with a prompt template. Billing metadata (client_id, app, env) is required; streaming is disabled.")]
    async fn run_prompt_completion(
        &self,
        Parameters(params): Parameters<RunCompletionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.prompt_id, "prompt_id")?;
        respond(
            self.client.prompts().complete(&params).await,
            "running prompt completion",
        )
    }

    #[tool(description = "Create or update a prompt by name in a collection. Only writes a new version when the template, parameters or model changed. Supports dry_run.")]
    async fn migrate_prompt(
        &self,
        Parameters(params): Parameters<MigratePromptParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.name, "name")?;
        require(&params.collection_id, "collection_id")?;
        respond(
            self.client.prompts().migrate(&params).await,
            "migrating prompt",
        )
    }

    #[tool(description = "Copy a prompt's current version into another collection for a target environment (dev, staging, prod).")]
    async fn promote_prompt(
        &self,
        Parameters(params): Parameters<PromotePromptParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.source_prompt_id, "source_prompt_id")?;
        require(&params.target_collection_id, "target_collection_id")?;
        require(&params.target_env, "target_env")?;
        respond(
            self.client.prompts().promote(&params).await,
            "promoting prompt",
        )
    }

    #[tool(description = "Check billing metadata before running a completion. Returns {valid, errors, warnings}; nothing is sent upstream.")]
    async fn validate_completion_metadata(
        &self,
        Parameters(params): Parameters<BillingMetadata>,
    ) -> Result<CallToolResult, ErrorData> {
        let check = validate_billing_metadata(&params);
        let value = serde_json::to_value(&check).map_err(|e| {
            ErrorData::internal_error(format!("failed to serialize result: {e}"), None)
        })?;
        Ok(CallToolResult::structured(value))
    }
}
