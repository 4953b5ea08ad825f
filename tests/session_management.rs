//! Integration tests for HTTP session management on `/mcp`.
//!
//! These tests verify that:
//! - Requests are routed by the `Mcp-Session-Id` header, with the documented
//!   400 JSON-RPC envelope for anything that does not resolve
//! - `/ready` counts live sessions
//! - DELETE, idle expiry and shutdown all end a session for good

mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::net::TcpListener;

use portkey_mcp::api::{router, AppState};
use portkey_mcp::config::HttpConfig;
use portkey_mcp::lifecycle::Lifecycle;
use portkey_mcp::session::{SessionStore, TrackedSessionManager};

use common::{mcp_post, open_session, rpc, FakeUpstream, INITIALIZE, INITIALIZED};

struct TestServer {
    addr: SocketAddr,
    state: AppState,
    lifecycle: Lifecycle,
    _upstream: FakeUpstream,
}

async fn start_server(session_timeout: Duration, sweep_interval: Duration) -> TestServer {
    let upstream = FakeUpstream::start().await;
    let sessions = Arc::new(TrackedSessionManager::new(SessionStore::new()));
    let state = AppState::new(sessions);
    let app = router(state.clone(), upstream.client());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = HttpConfig {
        session_timeout,
        sweep_interval,
        ..HttpConfig::default()
    };
    let lifecycle = Lifecycle::new(state.clone(), &config);
    lifecycle.start();
    tokio::time::sleep(Duration::from_millis(10)).await;

    TestServer {
        addr,
        state,
        lifecycle,
        _upstream: upstream,
    }
}

async fn start_default_server() -> TestServer {
    start_server(Duration::from_secs(1800), Duration::from_secs(60)).await
}

async fn assert_rejected(response: reqwest::Response, message: &str) {
    assert_eq!(response.status(), 400);
    let json: Value = response.json().await.unwrap();
    assert_eq!(
        json,
        json!({
            "jsonrpc": "2.0",
            "error": { "code": -32000, "message": message },
            "id": null,
        })
    );
}

async fn ready_sessions(client: &reqwest::Client, addr: SocketAddr) -> Value {
    let response = client
        .get(format!("http://{addr}/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let json: Value = response.json().await.unwrap();
    json["sessions"].clone()
}

fn tools_list(id: u64) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "method": "tools/list" })
}

// ── Routing ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_post_without_session_must_be_initialize() {
    let server = start_default_server().await;
    let client = reqwest::Client::new();

    let response = mcp_post(&client, server.addr)
        .body(tools_list(1).to_string())
        .send()
        .await
        .unwrap();
    assert_rejected(response, "Missing session ID or invalid initialize request").await;
    assert!(server.state.sessions.store().is_empty());
}

#[tokio::test]
async fn test_unknown_session_is_rejected() {
    let server = start_default_server().await;
    let client = reqwest::Client::new();

    let response = mcp_post(&client, server.addr)
        .header("Mcp-Session-Id", "does-not-exist")
        .body(tools_list(1).to_string())
        .send()
        .await
        .unwrap();
    assert_rejected(response, "Session not found").await;
}

#[tokio::test]
async fn test_get_and_delete_need_a_live_session() {
    let server = start_default_server().await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/mcp", server.addr);

    let response = client
        .get(&url)
        .header("Accept", "text/event-stream")
        .send()
        .await
        .unwrap();
    assert_rejected(response, "Invalid or missing session ID").await;

    let response = client
        .delete(&url)
        .header("Mcp-Session-Id", "does-not-exist")
        .send()
        .await
        .unwrap();
    assert_rejected(response, "Invalid or missing session ID").await;
}

// ── Lifecycle ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_initialize_creates_counted_session() {
    let server = start_default_server().await;
    let client = reqwest::Client::new();

    assert_eq!(ready_sessions(&client, server.addr).await, 0);
    let first = open_session(&client, server.addr).await;
    let second = open_session(&client, server.addr).await;
    assert_ne!(first, second);
    assert_eq!(ready_sessions(&client, server.addr).await, 2);
}

#[tokio::test]
async fn test_delete_ends_session() {
    let server = start_default_server().await;
    let client = reqwest::Client::new();
    let session_id = open_session(&client, server.addr).await;

    let response = client
        .delete(format!("http://{}/mcp", server.addr))
        .header("Mcp-Session-Id", &session_id)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(ready_sessions(&client, server.addr).await, 0);

    let response = mcp_post(&client, server.addr)
        .header("Mcp-Session-Id", &session_id)
        .body(tools_list(2).to_string())
        .send()
        .await
        .unwrap();
    assert_rejected(response, "Session not found").await;
}

#[tokio::test]
async fn test_deleting_one_session_leaves_others() {
    let server = start_default_server().await;
    let client = reqwest::Client::new();
    let doomed = open_session(&client, server.addr).await;
    let survivor = open_session(&client, server.addr).await;

    client
        .delete(format!("http://{}/mcp", server.addr))
        .header("Mcp-Session-Id", &doomed)
        .send()
        .await
        .unwrap();

    let json = rpc(&client, server.addr, &survivor, tools_list(3)).await;
    assert!(json["result"]["tools"].is_array());
    assert_eq!(ready_sessions(&client, server.addr).await, 1);
}

#[tokio::test]
async fn test_idle_session_expires() {
    let server = start_server(Duration::from_millis(300), Duration::from_millis(50)).await;
    let client = reqwest::Client::new();
    let session_id = open_session(&client, server.addr).await;
    assert_eq!(server.state.sessions.store().len(), 1);

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !server.state.sessions.store().is_empty() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "session was not swept in time"
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let response = mcp_post(&client, server.addr)
        .header("Mcp-Session-Id", &session_id)
        .body(INITIALIZED)
        .send()
        .await
        .unwrap();
    assert_rejected(response, "Session not found").await;
}

#[tokio::test]
async fn test_active_session_outlives_idle_one() {
    let server = start_server(Duration::from_millis(600), Duration::from_millis(50)).await;
    let client = reqwest::Client::new();
    let idle = open_session(&client, server.addr).await;
    let active = open_session(&client, server.addr).await;

    // Keep `active` busy for longer than the idle timeout.
    for id in 10..20 {
        rpc(&client, server.addr, &active, tools_list(id)).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    assert!(!server.state.sessions.store().contains(&idle));
    assert!(server.state.sessions.store().contains(&active));
}

#[tokio::test]
async fn test_shutdown_closes_every_session() {
    let server = start_default_server().await;
    let client = reqwest::Client::new();
    let session_id = open_session(&client, server.addr).await;
    open_session(&client, server.addr).await;

    assert!(server.lifecycle.shutdown().await);
    assert!(server.state.sessions.store().is_empty());

    let response = client
        .get(format!("http://{}/ready", server.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 503);
    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "not_ready");

    let response = mcp_post(&client, server.addr)
        .header("Mcp-Session-Id", &session_id)
        .body(tools_list(4).to_string())
        .send()
        .await
        .unwrap();
    assert_rejected(response, "Server is shutting down").await;

    // No new session can be opened while the server drains.
    let response = mcp_post(&client, server.addr)
        .body(INITIALIZE)
        .send()
        .await
        .unwrap();
    assert_rejected(response, "Server is shutting down").await;
    assert!(server.state.sessions.store().is_empty());
    assert_eq!(server.state.sessions.pending_len(), 0);

    assert!(!server.lifecycle.shutdown().await);
}
