use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{segment, ClientError, PortkeyClient};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateFeedbackParams {
    /// Trace the feedback is attached to.
    pub trace_id: String,
    /// Score, typically -10..=10.
    pub value: i64,
    /// Relative weight between 0 and 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateFeedbackParams {
    #[serde(skip_serializing)]
    pub feedback_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TraceIdParams {
    /// Log or trace ID.
    pub trace_id: String,
}

/// Feedback and trace lookup.
pub struct Traces<'a> {
    client: &'a PortkeyClient,
}

impl<'a> Traces<'a> {
    pub(super) fn new(client: &'a PortkeyClient) -> Self {
        Self { client }
    }

    pub async fn create_feedback(&self, params: &CreateFeedbackParams) -> Result<Value, ClientError> {
        self.client.post("/feedback", Some(params)).await
    }

    pub async fn update_feedback(&self, params: &UpdateFeedbackParams) -> Result<Value, ClientError> {
        self.client
            .put(&format!("/feedback/{}", segment(&params.feedback_id)), Some(params))
            .await
    }

    pub async fn get(&self, trace_id: &str) -> Result<Value, ClientError> {
        self.client
            .get(&format!("/logs/{}", segment(trace_id)), &())
            .await
    }
}
