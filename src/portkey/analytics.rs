use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{segment, ClientError, PortkeyClient};

/// Filter accepted by every analytics graph and group endpoint.
///
/// Only the time window is required; every other field narrows the result set.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyticsFilter {
    /// Start of the window (ISO 8601).
    pub time_of_generation_min: String,
    /// End of the window (ISO 8601).
    pub time_of_generation_max: String,
    pub total_units_min: Option<u64>,
    pub total_units_max: Option<u64>,
    pub cost_min: Option<f64>,
    pub cost_max: Option<f64>,
    pub prompt_token_min: Option<u64>,
    pub prompt_token_max: Option<u64>,
    pub completion_token_min: Option<u64>,
    pub completion_token_max: Option<u64>,
    /// Comma-separated HTTP status codes.
    pub status_code: Option<String>,
    pub weighted_feedback_min: Option<f64>,
    pub weighted_feedback_max: Option<f64>,
    /// Comma-separated virtual key slugs.
    pub virtual_keys: Option<String>,
    /// Comma-separated config slugs.
    pub configs: Option<String>,
    pub workspace_slug: Option<String>,
    /// Comma-separated API key IDs.
    pub api_key_ids: Option<String>,
    /// JSON-encoded metadata filter.
    pub metadata: Option<String>,
    pub ai_org_model: Option<String>,
    pub trace_id: Option<String>,
    pub span_id: Option<String>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MetadataGroupParams {
    /// Metadata key to group by (e.g. `app` or `client_id`).
    #[serde(skip_serializing)]
    pub metadata_key: String,
    #[serde(flatten)]
    pub filter: AnalyticsFilter,
}

/// Time-series graphs exposed under `/analytics/graphs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Graph {
    Cost,
    Requests,
    Tokens,
    Latency,
    Users,
    UserRequests,
    Errors,
    ErrorRate,
    ErrorStacks,
    ErrorStatusCodes,
    RescuedRequests,
    CacheHitRate,
    CacheLatency,
    Feedback,
    FeedbackScores,
    FeedbackWeighted,
    FeedbackModels,
}

impl Graph {
    pub fn path(self) -> &'static str {
        match self {
            Graph::Cost => "cost",
            Graph::Requests => "requests",
            Graph::Tokens => "tokens",
            Graph::Latency => "latency",
            Graph::Users => "users",
            Graph::UserRequests => "users/requests",
            Graph::Errors => "errors",
            Graph::ErrorRate => "errors/rate",
            Graph::ErrorStacks => "errors/stacks",
            Graph::ErrorStatusCodes => "errors/status-codes",
            Graph::RescuedRequests => "requests/rescued",
            Graph::CacheHitRate => "cache/hit-rate",
            Graph::CacheLatency => "cache/latency",
            Graph::Feedback => "feedbacks",
            Graph::FeedbackScores => "feedbacks/scores",
            Graph::FeedbackWeighted => "feedbacks/weighted",
            Graph::FeedbackModels => "feedbacks/ai-models",
        }
    }
}

pub struct Analytics<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Analytics<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn graph(&self, graph: Graph, filter: &AnalyticsFilter) -> Result<Value, ClientError> {
        self.client
            .get(&format!("/analytics/graphs/{}", graph.path()), filter)
            .await
    }

    pub async fn model_groups(&self, filter: &AnalyticsFilter) -> Result<Value, ClientError> {
        self.client.get("/analytics/groups/ai-models", filter).await
    }

    pub async fn metadata_groups(&self, params: &MetadataGroupParams) -> Result<Value, ClientError> {
        self.client
            .get(
                &format!("/analytics/groups/metadata/{}", segment(&params.metadata_key)),
                &params.filter,
            )
            .await
    }
}
