pub mod dispatch;
pub mod error;
mod handlers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::HeaderName,
    middleware,
    routing::get,
    Router,
};
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::mcp::PortkeyMcpServer;
use crate::portkey::PortkeyClient;
use crate::session::TrackedSessionManager;

use handlers::*;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<TrackedSessionManager>,
    /// Flipped on once the listener is bound and off again when shutdown
    /// begins; drives `/ready`.
    pub ready: Arc<AtomicBool>,
    /// Set once shutdown begins; the `/mcp` gate refuses all traffic after.
    pub shutting_down: Arc<AtomicBool>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(sessions: Arc<TrackedSessionManager>) -> Self {
        Self {
            sessions,
            ready: Arc::new(AtomicBool::new(false)),
            shutting_down: Arc::new(AtomicBool::new(false)),
            started_at: Instant::now(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Acquire)
    }

    /// Mark shutdown as started. Returns `false` if it already was.
    pub fn begin_shutdown(&self) -> bool {
        !self.shutting_down.swap(true, Ordering::AcqRel)
    }
}

pub fn router(state: AppState, client: Arc<PortkeyClient>) -> Router {
    let mcp_service = StreamableHttpService::new(
        move || Ok(PortkeyMcpServer::new(Arc::clone(&client))),
        Arc::clone(&state.sessions),
        StreamableHttpServerConfig::default(),
    );

    let mcp = Router::new()
        .nest_service("/mcp", mcp_service)
        .layer(middleware::from_fn_with_state(state.clone(), dispatch::gate));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(dispatch::SESSION_HEADER)]);

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
        .merge(mcp)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, DEFAULT_TIMEOUT};
    use crate::session::SessionStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    const INITIALIZE: &str = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test-client","version":"1.0.0"}}}"#;
    const INITIALIZED: &str = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;

    fn create_test_state() -> (AppState, Arc<PortkeyClient>) {
        let config = ApiConfig::new(
            Some("test-key".into()),
            Some("http://127.0.0.1:9/v1".into()),
            DEFAULT_TIMEOUT,
        )
        .unwrap();
        let client = Arc::new(PortkeyClient::new(&config).unwrap());
        let sessions = Arc::new(TrackedSessionManager::new(SessionStore::new()));
        (AppState::new(sessions), client)
    }

    fn mcp_request(method: &str, session: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri("/mcp")
            .header("content-type", "application/json")
            .header("accept", "application/json, text/event-stream");
        if let Some(id) = session {
            builder = builder.header(dispatch::SESSION_HEADER, id);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn assert_rejected(response: Response, message: &str) {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["error"]["code"], -32000);
        assert_eq!(json["error"]["message"], message);
        assert!(json["id"].is_null());
    }

    async fn initialize(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(mcp_request("POST", None, INITIALIZE))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get(dispatch::SESSION_HEADER)
            .expect("initialize response carries a session id")
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (state, client) = create_test_state();
        let app = router(state, client);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(json["uptime"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn test_ready_before_startup_is_503() {
        let (state, client) = create_test_state();
        let app = router(state, client);

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let json = json_body(response).await;
        assert_eq!(json["status"], "not_ready");
        assert!(json.get("sessions").is_none());
    }

    #[tokio::test]
    async fn test_ready_reports_session_count() {
        let (state, client) = create_test_state();
        state.set_ready(true);
        let app = router(state, client);

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["status"], "ready");
        assert_eq!(json["sessions"], 0);
    }

    #[tokio::test]
    async fn test_post_without_session_requires_initialize() {
        let (state, client) = create_test_state();
        let app = router(state, client);

        let response = app
            .oneshot(mcp_request(
                "POST",
                None,
                r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
            ))
            .await
            .unwrap();
        assert_rejected(response, "Missing session ID or invalid initialize request").await;
    }

    #[tokio::test]
    async fn test_post_with_malformed_body_is_rejected() {
        let (state, client) = create_test_state();
        let app = router(state, client);

        let response = app
            .oneshot(mcp_request("POST", None, "{not json"))
            .await
            .unwrap();
        assert_rejected(response, "Missing session ID or invalid initialize request").await;
    }

    #[tokio::test]
    async fn test_post_with_unknown_session() {
        let (state, client) = create_test_state();
        let app = router(state, client);

        let response = app
            .oneshot(mcp_request("POST", Some("nope"), INITIALIZED))
            .await
            .unwrap();
        assert_rejected(response, "Session not found").await;
    }

    #[tokio::test]
    async fn test_get_without_session() {
        let (state, client) = create_test_state();
        let app = router(state, client);

        let response = app
            .oneshot(Request::builder().uri("/mcp").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_rejected(response, "Invalid or missing session ID").await;
    }

    #[tokio::test]
    async fn test_delete_with_unknown_session() {
        let (state, client) = create_test_state();
        let app = router(state, client);

        let response = app
            .oneshot(mcp_request("DELETE", Some("nope"), ""))
            .await
            .unwrap();
        assert_rejected(response, "Invalid or missing session ID").await;
    }

    #[tokio::test]
    async fn test_initialize_creates_tracked_session() {
        let (state, client) = create_test_state();
        let sessions = Arc::clone(&state.sessions);
        let app = router(state, client);

        let id = initialize(&app).await;
        assert!(sessions.store().contains(&id));
        assert_eq!(sessions.store().len(), 1);

        let response = app
            .clone()
            .oneshot(mcp_request("POST", Some(&id), INITIALIZED))
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn test_delete_closes_session() {
        let (state, client) = create_test_state();
        let sessions = Arc::clone(&state.sessions);
        let app = router(state, client);

        let id = initialize(&app).await;
        let response = app
            .clone()
            .oneshot(mcp_request("DELETE", Some(&id), ""))
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert!(sessions.store().is_empty());

        let response = app
            .oneshot(mcp_request("POST", Some(&id), INITIALIZED))
            .await
            .unwrap();
        assert_rejected(response, "Session not found").await;
    }

    #[tokio::test]
    async fn test_mcp_refused_once_shutdown_begins() {
        let (state, client) = create_test_state();
        let sessions = Arc::clone(&state.sessions);
        let app = router(state.clone(), client);
        let id = initialize(&app).await;

        assert!(state.begin_shutdown());
        assert!(!state.begin_shutdown());

        let response = app
            .clone()
            .oneshot(mcp_request("POST", None, INITIALIZE))
            .await
            .unwrap();
        assert_rejected(response, "Server is shutting down").await;

        let response = app
            .clone()
            .oneshot(mcp_request("POST", Some(&id), INITIALIZED))
            .await
            .unwrap();
        assert_rejected(response, "Server is shutting down").await;

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(sessions.store().len(), 1);
    }

    #[tokio::test]
    async fn test_cors_exposes_session_header() {
        let (state, client) = create_test_state();
        let app = router(state, client);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let exposed = response
            .headers()
            .get("access-control-expose-headers")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(exposed.contains(dispatch::SESSION_HEADER));
    }
}
