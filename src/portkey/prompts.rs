//! Prompt templates, their versions, and the workflows built on top of them:
//! idempotent migration of a template into a collection, promotion between
//! environments, and the billing-metadata check applied before completions.

use chrono::{SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{segment, ClientError, PortkeyClient};

/// Free-form metadata stored alongside a prompt version.
pub type TemplateMetadata = Map<String, Value>;

const KNOWN_APPS: [&str; 3] = ["hourlink", "apizone", "research-pilot"];
const KNOWN_ENVS: [&str; 3] = ["dev", "staging", "prod"];

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreatePromptParams {
    pub name: String,
    pub collection_id: String,
    /// Template body: a message array or a template string.
    pub string: Value,
    /// Default values for template variables.
    pub parameters: Value,
    pub virtual_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_metadata: Option<TemplateMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListPromptsParams {
    pub collection_id: Option<String>,
    pub workspace_id: Option<String>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    /// Name search.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PromptIdParams {
    /// Prompt ID or slug.
    pub prompt_id: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct UpdatePromptParams {
    #[serde(skip_serializing)]
    pub prompt_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_metadata: Option<TemplateMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PromptVersionParams {
    pub prompt_id: String,
    pub version_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PublishPromptParams {
    #[serde(skip_serializing)]
    pub prompt_id: String,
    /// Version number to make the default.
    pub version: u64,
}

/// Sampling overrides applied on top of the stored template.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Hyperparameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RenderPromptParams {
    #[serde(skip_serializing)]
    pub prompt_id: String,
    /// Values for the template variables.
    pub variables: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperparameters: Option<Hyperparameters>,
}

/// Cost-attribution metadata attached to completions.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BillingMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// One of `hourlink`, `apizone`, `research-pilot`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    /// One of `dev`, `staging`, `prod`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RunCompletionParams {
    pub prompt_id: String,
    pub variables: Map<String, Value>,
    /// Required. Completions without billing metadata are refused.
    pub metadata: Option<BillingMetadata>,
    pub hyperparameters: Option<Hyperparameters>,
}

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    variables: &'a Map<String, Value>,
    metadata: &'a BillingMetadata,
    stream: bool,
    #[serde(flatten)]
    hyperparameters: Option<&'a Hyperparameters>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MigratePromptParams {
    pub name: String,
    /// Application the prompt belongs to.
    pub app: String,
    /// Target environment.
    pub env: String,
    pub collection_id: String,
    pub string: Value,
    pub parameters: Value,
    pub virtual_key: String,
    pub model: Option<String>,
    pub version_description: Option<String>,
    pub template_metadata: Option<TemplateMetadata>,
    pub functions: Option<Value>,
    pub tools: Option<Value>,
    pub tool_choice: Option<Value>,
    /// Report what would happen without writing anything.
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MigrateAction {
    Created,
    Updated,
    Unchanged,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MigrateOutcome {
    pub action: MigrateAction,
    pub prompt_id: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    pub dry_run: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PromotePromptParams {
    pub source_prompt_id: String,
    pub target_collection_id: String,
    /// Defaults to the source name with its env suffix swapped for `target_env`.
    pub target_name: Option<String>,
    pub target_env: String,
    /// Overrides the source version's virtual key when creating the target.
    pub virtual_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PromoteOutcome {
    pub source_prompt_id: String,
    pub source_version_id: String,
    pub target_prompt_id: String,
    pub target_version_id: String,
    /// `created` or `updated`.
    pub action: MigrateAction,
    pub promoted_at: String,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MetadataValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

// Partial views of upstream payloads; everything else passes through untouched.

#[derive(Debug, Deserialize)]
struct PromptList {
    #[serde(default)]
    data: Vec<PromptSummary>,
}

#[derive(Debug, Deserialize)]
struct PromptSummary {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    slug: String,
}

#[derive(Debug, Deserialize)]
struct PromptDetail {
    #[serde(default)]
    name: String,
    #[serde(default)]
    slug: String,
    current_version: StoredVersion,
}

#[derive(Debug, Deserialize)]
struct StoredVersion {
    id: String,
    #[serde(default)]
    version_number: u64,
    #[serde(default)]
    string: Value,
    #[serde(default)]
    parameters: Value,
    model: Option<String>,
    virtual_key: Option<String>,
    functions: Option<Value>,
    tools: Option<Value>,
    tool_choice: Option<Value>,
    #[serde(default)]
    template_metadata: TemplateMetadata,
}

#[derive(Debug, Deserialize)]
struct Created {
    id: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    version_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Updated {
    id: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    prompt_version_id: Option<String>,
}

/// Prompt templates (`/prompts`).
pub struct Prompts<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Prompts<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, params: &CreatePromptParams) -> Result<Value, ClientError> {
        self.client.post("/prompts", Some(params)).await
    }

    pub async fn list(&self, params: &ListPromptsParams) -> Result<Value, ClientError> {
        self.client.get("/prompts", params).await
    }

    pub async fn get(&self, prompt_id: &str) -> Result<Value, ClientError> {
        self.client.get(&path(prompt_id), &()).await
    }

    pub async fn update(&self, params: &UpdatePromptParams) -> Result<Value, ClientError> {
        self.client.put(&path(&params.prompt_id), Some(params)).await
    }

    pub async fn delete(&self, prompt_id: &str) -> Result<Value, ClientError> {
        self.client.delete(&path(prompt_id)).await
    }

    pub async fn versions(&self, prompt_id: &str) -> Result<Value, ClientError> {
        self.client
            .get(&format!("{}/versions", path(prompt_id)), &())
            .await
    }

    pub async fn version(&self, prompt_id: &str, version_id: &str) -> Result<Value, ClientError> {
        self.client
            .get(
                &format!("{}/versions/{}", path(prompt_id), segment(version_id)),
                &(),
            )
            .await
    }

    pub async fn publish(&self, params: &PublishPromptParams) -> Result<Value, ClientError> {
        self.client
            .put(&format!("{}/makeDefault", path(&params.prompt_id)), Some(params))
            .await
    }

    pub async fn render(&self, params: &RenderPromptParams) -> Result<Value, ClientError> {
        self.client
            .post(&format!("{}/render", path(&params.prompt_id)), Some(params))
            .await
    }

    /// Run a completion against the prompt's default version.
    ///
    /// Billing metadata must be present and valid; nothing is sent upstream
    /// otherwise. Streaming is always disabled.
    pub async fn complete(&self, params: &RunCompletionParams) -> Result<Value, ClientError> {
        let metadata = params.metadata.as_ref().ok_or_else(|| {
            ClientError::Invalid("Billing metadata is required for prompt completions".into())
        })?;
        let check = validate_billing_metadata(metadata);
        if !check.valid {
            return Err(ClientError::Invalid(format!(
                "Billing metadata validation failed: {}",
                check.errors.join(", ")
            )));
        }

        let body = CompletionBody {
            variables: &params.variables,
            metadata,
            stream: false,
            hyperparameters: params.hyperparameters.as_ref(),
        };
        self.client
            .post(&format!("{}/completions", path(&params.prompt_id)), Some(&body))
            .await
    }

    /// Create or update a prompt by name inside a collection.
    ///
    /// Existing prompts only get a new version when the template, parameters
    /// or (if given) model changed.
    pub async fn migrate(&self, params: &MigratePromptParams) -> Result<MigrateOutcome, ClientError> {
        self.try_migrate(params)
            .await
            .map_err(|e| ClientError::Invalid(format!("Failed to migrate prompt: {e}")))
    }

    async fn try_migrate(&self, params: &MigratePromptParams) -> Result<MigrateOutcome, ClientError> {
        let dry_run = params.dry_run;
        let existing = self
            .find_by_name(&params.collection_id, &params.name)
            .await?;

        let Some(existing) = existing else {
            if dry_run {
                return Ok(MigrateOutcome {
                    action: MigrateAction::Created,
                    prompt_id: String::new(),
                    slug: String::new(),
                    version_id: None,
                    dry_run: true,
                    message: format!("Would create new prompt \"{}\"", params.name),
                });
            }

            let body = CreatePromptParams {
                name: params.name.clone(),
                collection_id: params.collection_id.clone(),
                string: params.string.clone(),
                parameters: params.parameters.clone(),
                virtual_key: params.virtual_key.clone(),
                model: params.model.clone(),
                version_description: params.version_description.clone(),
                template_metadata: Some(migration_metadata(params)),
                functions: params.functions.clone(),
                tools: params.tools.clone(),
                tool_choice: params.tool_choice.clone(),
            };
            let created: Created = self.client.post("/prompts", Some(&body)).await?;
            tracing::info!(prompt_id = %created.id, name = %params.name, "prompt created by migration");
            return Ok(MigrateOutcome {
                action: MigrateAction::Created,
                prompt_id: created.id,
                slug: created.slug,
                version_id: created.version_id,
                dry_run: false,
                message: format!("Created new prompt \"{}\"", params.name),
            });
        };

        let current: PromptDetail = self.client.get(&path(&existing.id), &()).await?;
        if !needs_update(&current.current_version, params) {
            return Ok(MigrateOutcome {
                action: MigrateAction::Unchanged,
                prompt_id: existing.id,
                slug: existing.slug,
                version_id: None,
                dry_run,
                message: format!("Prompt \"{}\" already exists and is up to date", params.name),
            });
        }

        if dry_run {
            return Ok(MigrateOutcome {
                action: MigrateAction::Updated,
                prompt_id: existing.id,
                slug: existing.slug,
                version_id: None,
                dry_run: true,
                message: format!("Would update prompt \"{}\" (changes detected)", params.name),
            });
        }

        let body = UpdatePromptParams {
            prompt_id: existing.id.clone(),
            string: Some(params.string.clone()),
            parameters: Some(params.parameters.clone()),
            model: params.model.clone(),
            virtual_key: Some(params.virtual_key.clone()),
            version_description: params.version_description.clone(),
            template_metadata: Some(migration_metadata(params)),
            functions: params.functions.clone(),
            tools: params.tools.clone(),
            tool_choice: params.tool_choice.clone(),
            ..UpdatePromptParams::default()
        };
        let updated: Updated = self.client.put(&path(&existing.id), Some(&body)).await?;
        tracing::info!(prompt_id = %updated.id, name = %params.name, "prompt updated by migration");
        Ok(MigrateOutcome {
            action: MigrateAction::Updated,
            prompt_id: updated.id,
            slug: updated.slug,
            version_id: updated.prompt_version_id,
            dry_run: false,
            message: format!("Updated prompt \"{}\" with new version", params.name),
        })
    }

    /// Copy the source prompt's current version into the target collection.
    pub async fn promote(&self, params: &PromotePromptParams) -> Result<PromoteOutcome, ClientError> {
        self.try_promote(params)
            .await
            .map_err(|e| ClientError::Invalid(format!("Failed to promote prompt: {e}")))
    }

    async fn try_promote(&self, params: &PromotePromptParams) -> Result<PromoteOutcome, ClientError> {
        let source: PromptDetail = self
            .client
            .get(&path(&params.source_prompt_id), &())
            .await?;
        let version = source.current_version;

        let target_name = params
            .target_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| promoted_name(&source.name, &params.target_env));

        let mut metadata = version.template_metadata.clone();
        metadata.insert("env".into(), Value::String(params.target_env.clone()));
        metadata.insert("promoted_from".into(), Value::String(source.slug.clone()));
        metadata.insert(
            "promoted_from_version".into(),
            Value::String(version.version_number.to_string()),
        );
        metadata.insert("promoted_at".into(), Value::String(now()));
        let description = format!("Promoted from {} v{}", source.slug, version.version_number);

        let existing = self
            .find_by_name(&params.target_collection_id, &target_name)
            .await?;

        if let Some(existing) = existing {
            let body = UpdatePromptParams {
                prompt_id: existing.id.clone(),
                string: Some(version.string.clone()),
                parameters: Some(version.parameters.clone()),
                model: version.model.clone(),
                virtual_key: version.virtual_key.clone(),
                functions: version.functions.clone(),
                tools: version.tools.clone(),
                tool_choice: version.tool_choice.clone(),
                version_description: Some(description),
                template_metadata: Some(metadata),
                ..UpdatePromptParams::default()
            };
            let updated: Updated = self.client.put(&path(&existing.id), Some(&body)).await?;
            tracing::info!(source = %params.source_prompt_id, target = %updated.id, env = %params.target_env, "prompt promoted");
            return Ok(PromoteOutcome {
                source_prompt_id: params.source_prompt_id.clone(),
                source_version_id: version.id,
                target_prompt_id: updated.id,
                target_version_id: updated.prompt_version_id.unwrap_or_default(),
                action: MigrateAction::Updated,
                promoted_at: now(),
            });
        }

        let virtual_key = params
            .virtual_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| version.virtual_key.clone().filter(|k| !k.is_empty()))
            .ok_or_else(|| {
                ClientError::Invalid(
                    "Cannot promote prompt: source version has no virtual_key and none was provided"
                        .into(),
                )
            })?;

        let body = CreatePromptParams {
            name: target_name,
            collection_id: params.target_collection_id.clone(),
            string: version.string.clone(),
            parameters: version.parameters.clone(),
            virtual_key,
            model: version.model.clone(),
            version_description: Some(description),
            template_metadata: Some(metadata),
            functions: version.functions.clone(),
            tools: version.tools.clone(),
            tool_choice: version.tool_choice.clone(),
        };
        let created: Created = self.client.post("/prompts", Some(&body)).await?;
        tracing::info!(source = %params.source_prompt_id, target = %created.id, env = %params.target_env, "prompt promoted");
        Ok(PromoteOutcome {
            source_prompt_id: params.source_prompt_id.clone(),
            source_version_id: version.id,
            target_prompt_id: created.id,
            target_version_id: created.version_id.unwrap_or_default(),
            action: MigrateAction::Created,
            promoted_at: now(),
        })
    }

    async fn find_by_name(
        &self,
        collection_id: &str,
        name: &str,
    ) -> Result<Option<PromptSummary>, ClientError> {
        let query = ListPromptsParams {
            collection_id: Some(collection_id.to_string()),
            search: Some(name.to_string()),
            ..ListPromptsParams::default()
        };
        let list: PromptList = self.client.get("/prompts", &query).await?;
        let wanted = name.to_lowercase();
        Ok(list
            .data
            .into_iter()
            .find(|p| p.name.to_lowercase() == wanted))
    }
}

/// Check billing metadata before it is attached to a completion.
///
/// Missing `client_id`, `app` or `env` are errors. Unknown `app`/`env`
/// values and a missing `project_id` only produce warnings.
pub fn validate_billing_metadata(metadata: &BillingMetadata) -> MetadataValidation {
    let present = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let client_id = present(&metadata.client_id);
    let app = present(&metadata.app);
    let env = present(&metadata.env);

    if client_id.is_none() {
        errors.push("Missing required field: client_id".to_string());
    }
    if app.is_none() {
        errors.push("Missing required field: app".to_string());
    }
    if env.is_none() {
        errors.push("Missing required field: env".to_string());
    }

    if let Some(app) = app.filter(|a| !KNOWN_APPS.contains(&a.as_str())) {
        warnings.push(format!(
            "Unrecognized app: \"{app}\". Expected one of: {}",
            KNOWN_APPS.join(", ")
        ));
    }
    if let Some(env) = env.filter(|e| !KNOWN_ENVS.contains(&e.as_str())) {
        warnings.push(format!(
            "Unrecognized env: \"{env}\". Expected one of: {}",
            KNOWN_ENVS.join(", ")
        ));
    }
    if present(&metadata.project_id).is_none() {
        warnings.push(
            "Missing recommended field: project_id (helps with billing attribution)".to_string(),
        );
    }

    MetadataValidation {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn needs_update(current: &StoredVersion, incoming: &MigratePromptParams) -> bool {
    let template_changed = current.string != incoming.string;
    let parameters_changed = current.parameters != incoming.parameters;
    let model_changed = incoming
        .model
        .as_ref()
        .is_some_and(|m| current.model.as_ref() != Some(m));
    template_changed || parameters_changed || model_changed
}

fn migration_metadata(params: &MigratePromptParams) -> TemplateMetadata {
    let mut metadata = params.template_metadata.clone().unwrap_or_default();
    metadata.insert("app".into(), Value::String(params.app.clone()));
    metadata.insert("env".into(), Value::String(params.env.clone()));
    metadata.insert("migrated_at".into(), Value::String(now()));
    metadata
}

/// `summarize-dev` promoted to `prod` becomes `summarize-prod`.
fn promoted_name(source: &str, env: &str) -> String {
    let base = ["-dev", "-staging", "-prod"]
        .iter()
        .find_map(|suffix| source.strip_suffix(suffix))
        .unwrap_or(source);
    format!("{base}-{env}")
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn path(prompt_id: &str) -> String {
    format!("/prompts/{}", segment(prompt_id))
}
