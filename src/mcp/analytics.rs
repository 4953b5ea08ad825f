use rmcp::{handler::server::wrapper::Parameters, model::*, tool, tool_router};

use super::{require, respond, PortkeyMcpServer};
use crate::portkey::analytics::{AnalyticsFilter, Graph, MetadataGroupParams};

impl PortkeyMcpServer {
    async fn graph(
        &self,
        graph: Graph,
        filter: &AnalyticsFilter,
        what: &str,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.analytics().graph(graph, filter).await,
            &format!("fetching {what} analytics"),
        )
    }
}

// Every graph takes the same filter; only the endpoint differs.
#[tool_router(router = analytics_router, vis = "pub(super)")]
impl PortkeyMcpServer {
    #[tool(description = "Cost over time (total and average per bucket) for the given window and filters.")]
    async fn get_cost_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::Cost, &params, "cost").await
    }

    #[tool(description = "Request volume over time.")]
    async fn get_request_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::Requests, &params, "request").await
    }

    #[tool(description = "Token usage over time.")]
    async fn get_token_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::Tokens, &params, "token").await
    }

    #[tool(description = "Latency percentiles over time.")]
    async fn get_latency_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::Latency, &params, "latency").await
    }

    #[tool(description = "Distinct active users over time.")]
    async fn get_users_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::Users, &params, "users").await
    }

    #[tool(description = "Requests per user over time.")]
    async fn get_user_requests_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::UserRequests, &params, "user requests").await
    }

    #[tool(description = "Error counts over time.")]
    async fn get_error_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::Errors, &params, "error").await
    }

    #[tool(description = "Error rate over time.")]
    async fn get_error_rate_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::ErrorRate, &params, "error rate").await
    }

    #[tool(description = "Errors grouped by stack (provider and error type).")]
    async fn get_error_stacks_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::ErrorStacks, &params, "error stacks").await
    }

    #[tool(description = "Errors grouped by HTTP status code.")]
    async fn get_error_status_codes_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::ErrorStatusCodes, &params, "error status code")
            .await
    }

    #[tool(description = "Requests rescued by retries or fallbacks.")]
    async fn get_rescued_requests_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::RescuedRequests, &params, "rescued requests")
            .await
    }

    #[tool(description = "Cache hit rate over time.")]
    async fn get_cache_hit_rate_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::CacheHitRate, &params, "cache hit rate").await
    }

    #[tool(description = "Latency of cached responses over time.")]
    async fn get_cache_latency_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::CacheLatency, &params, "cache latency").await
    }

    #[tool(description = "Feedback volume over time.")]
    async fn get_feedback_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::Feedback, &params, "feedback").await
    }

    #[tool(description = "Distribution of feedback scores.")]
    async fn get_feedback_scores_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::FeedbackScores, &params, "feedback scores").await
    }

    #[tool(description = "Weighted feedback over time.")]
    async fn get_feedback_weighted_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::FeedbackWeighted, &params, "weighted feedback")
            .await
    }

    #[tool(description = "Feedback grouped by model.")]
    async fn get_feedback_models_analytics(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        self.graph(Graph::FeedbackModels, &params, "feedback by model")
            .await
    }

    #[tool(description = "Requests, tokens and cost grouped by model.")]
    async fn get_model_usage_groups(
        &self,
        Parameters(params): Parameters<AnalyticsFilter>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(
            self.client.analytics().model_groups(&params).await,
            "fetching model usage",
        )
    }

    #[tool(description = "Requests, tokens and cost grouped by the values of one metadata key (e.g. client_id or app).")]
    async fn get_metadata_groups(
        &self,
        Parameters(params): Parameters<MetadataGroupParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require(&params.metadata_key, "metadata_key")?;
        respond(
            self.client.analytics().metadata_groups(&params).await,
            "fetching metadata groups",
        )
    }
}
