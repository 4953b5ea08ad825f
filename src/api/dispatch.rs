use axum::{
    body::Body,
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use super::error::DispatchError;
use super::AppState;

/// Header carrying the session id on every request after initialize.
pub const SESSION_HEADER: &str = "mcp-session-id";

/// Largest request body buffered while checking for an initialize request.
const MAX_INITIALIZE_BODY: usize = 1024 * 1024;

fn session_id(req: &Request) -> Option<String> {
    req.headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Whether `body` is a JSON-RPC `initialize` request (not a notification or
/// response, and carrying the handshake params).
pub fn is_initialize_request(body: &[u8]) -> bool {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return false;
    };
    value.get("jsonrpc").and_then(Value::as_str) == Some("2.0")
        && value.get("method").and_then(Value::as_str) == Some("initialize")
        && value.get("id").is_some_and(|id| id.is_string() || id.is_number())
        && value
            .get("params")
            .and_then(|p| p.get("protocolVersion"))
            .is_some_and(Value::is_string)
}

/// Route `/mcp` requests by session id before the transport sees them.
///
/// POST with an id must resolve to a live session; POST without one must be
/// an initialize request, which the transport answers by creating a session.
/// GET (server stream) and DELETE (close) always need a live id. Once
/// shutdown has begun nothing gets through.
pub(super) async fn gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, DispatchError> {
    if state.is_shutting_down() {
        return Err(DispatchError::ShuttingDown);
    }
    let id = session_id(&req);

    match *req.method() {
        Method::POST => match id {
            Some(id) => {
                if !state.sessions.is_live(&id).await {
                    tracing::debug!(session_id = %id, "rejected request for unknown session");
                    return Err(DispatchError::SessionNotFound);
                }
                Ok(next.run(req).await)
            }
            None => {
                let (parts, body) = req.into_parts();
                let bytes = axum::body::to_bytes(body, MAX_INITIALIZE_BODY)
                    .await
                    .map_err(|_| DispatchError::InvalidInitialize)?;
                if !is_initialize_request(&bytes) {
                    return Err(DispatchError::InvalidInitialize);
                }
                Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
            }
        },
        Method::GET | Method::DELETE => match id {
            Some(id) if state.sessions.is_live(&id).await => Ok(next.run(req).await),
            _ => Err(DispatchError::InvalidSessionId),
        },
        // Anything else is the transport's to refuse.
        _ => Ok(next.run(req).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_request_detected() {
        let body = br#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"t","version":"1"}}}"#;
        assert!(is_initialize_request(body));
    }

    #[test]
    fn other_methods_are_not_initialize() {
        let body = br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        assert!(!is_initialize_request(body));
    }

    #[test]
    fn initialize_notification_is_not_a_request() {
        let body = br#"{"jsonrpc":"2.0","method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#;
        assert!(!is_initialize_request(body));
    }

    #[test]
    fn initialize_without_params_rejected() {
        let body = br#"{"jsonrpc":"2.0","id":"a","method":"initialize"}"#;
        assert!(!is_initialize_request(body));
    }

    #[test]
    fn garbage_is_not_initialize() {
        assert!(!is_initialize_request(b"not json"));
        assert!(!is_initialize_request(b""));
        assert!(!is_initialize_request(b"[]"));
    }
}
