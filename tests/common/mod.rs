#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use portkey_mcp::config::{ApiConfig, DEFAULT_TIMEOUT};
use portkey_mcp::portkey::PortkeyClient;

pub const TEST_API_KEY: &str = "pk-test-key";

/// One request as the fake upstream saw it. `path` has the `/v1` prefix
/// stripped.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query.as_deref().map(url_pairs).unwrap_or_default()
    }
}

fn url_pairs(query: &str) -> Vec<(String, String)> {
    reqwest::Url::parse(&format!("http://x/?{query}"))
        .map(|u| {
            u.query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: Value,
    delay: Option<Duration>,
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<(String, String), Canned>>,
    recorded: Mutex<Vec<RecordedRequest>>,
}

/// Minimal stand-in for the Portkey REST API.
///
/// Responses are canned per `(method, path)`; anything unregistered gets a
/// Portkey-style 404. Every request is recorded for later assertions.
pub struct FakeUpstream {
    pub addr: SocketAddr,
    shared: Arc<Shared>,
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new().fallback(handle).with_state(shared.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, shared }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) {
        self.insert(method, path, status, body, None);
    }

    /// Like [`on`](Self::on), but only after sleeping for `delay`.
    pub fn on_delayed(&self, method: &str, path: &str, delay: Duration, body: Value) {
        self.insert(method, path, 200, body, Some(delay));
    }

    fn insert(&self, method: &str, path: &str, status: u16, body: Value, delay: Option<Duration>) {
        self.shared.routes.lock().insert(
            (method.to_uppercase(), path.to_string()),
            Canned {
                status: StatusCode::from_u16(status).unwrap(),
                body,
                delay,
            },
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.recorded.lock().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn api_config(&self, timeout: Duration) -> ApiConfig {
        ApiConfig::new(Some(TEST_API_KEY.into()), Some(self.base_url()), timeout).unwrap()
    }

    pub fn client(&self) -> Arc<PortkeyClient> {
        self.client_with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn client_with_timeout(&self, timeout: Duration) -> Arc<PortkeyClient> {
        Arc::new(PortkeyClient::new(&self.api_config(timeout)).unwrap())
    }
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix("/v1")
        .unwrap_or(uri.path())
        .to_string();
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };
    shared.recorded.lock().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        api_key: headers
            .get("x-portkey-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let canned = shared
        .routes
        .lock()
        .get(&(method.to_string(), path))
        .cloned();
    match canned {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            (canned.status, Json(canned.body)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "message": "Not found" } })),
        )
            .into_response(),
    }
}

// ── MCP over HTTP helpers ──────────────────────────────────────────

pub const INITIALIZE: &str = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"0.1"}}}"#;
pub const INITIALIZED: &str = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;

pub fn mcp_post(client: &reqwest::Client, addr: SocketAddr) -> reqwest::RequestBuilder {
    client
        .post(format!("http://{addr}/mcp"))
        .header("Content-Type", "application/json")
        .header("Accept", "application/json, text/event-stream")
}

/// Extract the JSON-RPC message from an SSE event stream body.
pub fn extract_jsonrpc_from_sse(body: &str) -> Value {
    let events: Vec<&str> = body.split("\n\n").collect();
    for event in events.iter().rev() {
        for line in event.lines() {
            if let Some(data) = line.strip_prefix("data:") {
                if let Ok(json) = serde_json::from_str::<Value>(data.trim_start()) {
                    if json.get("jsonrpc").is_some() {
                        return json;
                    }
                }
            }
        }
    }
    panic!("No JSON-RPC response found in SSE body:\n{}", body);
}

/// Initialize a session and complete the handshake. Returns the session id.
pub async fn open_session(client: &reqwest::Client, addr: SocketAddr) -> String {
    let response = mcp_post(client, addr).body(INITIALIZE).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let session_id = response
        .headers()
        .get("mcp-session-id")
        .expect("initialize response should have Mcp-Session-Id header")
        .to_str()
        .unwrap()
        .to_string();
    let _ = response.text().await.unwrap();

    let response = mcp_post(client, addr)
        .header("Mcp-Session-Id", &session_id)
        .body(INITIALIZED)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    session_id
}

/// Send a JSON-RPC request on an existing session and return the response.
pub async fn rpc(
    client: &reqwest::Client,
    addr: SocketAddr,
    session_id: &str,
    body: Value,
) -> Value {
    let response = mcp_post(client, addr)
        .header("Mcp-Session-Id", session_id)
        .body(body.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200, "MCP endpoint should return 200 OK");
    extract_jsonrpc_from_sse(&response.text().await.unwrap())
}

/// Call a tool and return the `result` object.
pub async fn call_tool(
    client: &reqwest::Client,
    addr: SocketAddr,
    session_id: &str,
    id: u64,
    name: &str,
    arguments: Value,
) -> Value {
    let json = rpc(
        client,
        addr,
        session_id,
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments },
        }),
    )
    .await;
    json["result"].clone()
}

/// Text of the first content block of a tool result.
pub fn result_text(result: &Value) -> &str {
    result["content"][0]["text"]
        .as_str()
        .expect("tool result should have a text content block")
}
