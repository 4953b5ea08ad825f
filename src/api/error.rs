use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// JSON-RPC error code for transport-level rejections.
pub const SERVER_ERROR_CODE: i64 = -32000;

/// Why the `/mcp` dispatcher refused a request before it reached a session.
///
/// Every variant renders as HTTP 400 with a JSON-RPC error envelope and a
/// `null` id, since the request never got far enough to have one.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// POST carried a session id that does not resolve.
    #[error("Session not found")]
    SessionNotFound,
    /// POST without a session id whose body is not an initialize request.
    #[error("Missing session ID or invalid initialize request")]
    InvalidInitialize,
    /// GET or DELETE without a resolvable session id.
    #[error("Invalid or missing session ID")]
    InvalidSessionId,
    /// Any request that arrives after shutdown has begun.
    #[error("Server is shutting down")]
    ShuttingDown,
}

impl DispatchError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    pub fn code(&self) -> i64 {
        SERVER_ERROR_CODE
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            },
            "id": null,
        });
        (self.status_code(), Json(body)).into_response()
    }
}
