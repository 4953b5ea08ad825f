//! Integration tests for the `portkey-mcp stdio` subcommand.
//!
//! These tests verify that:
//! - The MCP server responds to initialize requests over stdin/stdout
//! - Tool calls reach the upstream API configured through the environment
//! - Clean shutdown occurs when stdin is closed
//! - A missing API key is fatal at startup
//!
//! Protocol: rmcp's stdio transport uses newline-delimited JSON.
//! Each message is a single JSON object on one line, terminated by `\n`.

mod common;

use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::Duration;

use serde_json::{json, Value};

use common::{FakeUpstream, TEST_API_KEY};

const TEST_TIMEOUT: Duration = Duration::from_secs(20);
const EXIT_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Test harness
// ---------------------------------------------------------------------------

/// Kills the child on drop so a failed assertion never leaks a process.
struct StdioHarness {
    child: Child,
}

impl Drop for StdioHarness {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl StdioHarness {
    fn spawn(upstream: &FakeUpstream) -> Self {
        let child = Command::new(env!("CARGO_BIN_EXE_portkey-mcp"))
            .arg("stdio")
            .env("PORTKEY_API_KEY", TEST_API_KEY)
            .env("PORTKEY_BASE_URL", upstream.base_url())
            .env("RUST_LOG", "portkey_mcp=debug")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to spawn portkey-mcp stdio");
        Self { child }
    }

    fn pipes(&mut self) -> (ChildStdin, BufReader<ChildStdout>) {
        let stdin = self.child.stdin.take().unwrap();
        let stdout = BufReader::new(self.child.stdout.take().unwrap());
        (stdin, stdout)
    }

    fn wait_for_exit(&mut self) -> std::process::ExitStatus {
        let start = std::time::Instant::now();
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => return status,
                Ok(None) => {
                    if start.elapsed() > EXIT_TIMEOUT {
                        panic!("portkey-mcp did not exit within {EXIT_TIMEOUT:?}");
                    }
                    std::thread::sleep(Duration::from_millis(50));
                }
                Err(e) => panic!("error waiting for child process: {e}"),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// JSON-RPC helpers
// ---------------------------------------------------------------------------

fn send_jsonrpc(stdin: &mut impl Write, msg: &Value) {
    let payload = serde_json::to_string(msg).unwrap();
    writeln!(stdin, "{}", payload).unwrap();
    stdin.flush().unwrap();
}

/// Read lines until the response carrying `id` arrives.
fn read_response(reader: &mut BufReader<impl Read>, id: u64) -> Value {
    loop {
        let mut line = String::new();
        let bytes_read = reader
            .read_line(&mut line)
            .expect("failed to read line from stdout");
        if bytes_read == 0 {
            panic!("unexpected EOF while waiting for response {id}");
        }
        let Ok(json) = serde_json::from_str::<Value>(line.trim()) else {
            continue;
        };
        if json["id"] == id {
            return json;
        }
    }
}

fn handshake(stdin: &mut impl Write, reader: &mut BufReader<impl Read>) -> Value {
    send_jsonrpc(
        stdin,
        &json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "test-stdio", "version": "0.1" }
            }
        }),
    );
    let response = read_response(reader, 1);
    send_jsonrpc(
        stdin,
        &json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
    );
    response
}

/// Run blocking child I/O off the runtime so the fake upstream keeps serving.
async fn run_blocking<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    tokio::time::timeout(TEST_TIMEOUT, tokio::task::spawn_blocking(f))
        .await
        .expect("test timed out")
        .expect("test thread panicked");
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_stdio_initialize() {
    let upstream = FakeUpstream::start().await;
    let mut harness = StdioHarness::spawn(&upstream);
    let (mut stdin, mut reader) = harness.pipes();

    run_blocking(move || {
        let response = handshake(&mut stdin, &mut reader);
        assert_eq!(response["jsonrpc"], "2.0");

        let result = &response["result"];
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "portkey-mcp");
        assert!(result["serverInfo"]["version"].is_string());
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["instructions"].is_string());
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stdio_tool_calls_reach_upstream() {
    let upstream = FakeUpstream::start().await;
    upstream.on(
        "GET",
        "/workspaces",
        200,
        json!({ "object": "list", "total": 1, "data": [{ "id": "ws-1", "name": "Core" }] }),
    );
    let mut harness = StdioHarness::spawn(&upstream);
    let (mut stdin, mut reader) = harness.pipes();

    run_blocking(move || {
        handshake(&mut stdin, &mut reader);

        send_jsonrpc(
            &mut stdin,
            &json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
        );
        let listed = read_response(&mut reader, 2);
        let tools = listed["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 126);

        send_jsonrpc(
            &mut stdin,
            &json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": { "name": "list_workspaces", "arguments": {} }
            }),
        );
        let called = read_response(&mut reader, 3);
        let text = called["result"]["content"][0]["text"]
            .as_str()
            .expect("Expected text content");
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["data"][0]["name"], "Core");
    })
    .await;

    let requests = upstream.requests_to("GET", "/workspaces");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].api_key.as_deref(), Some(TEST_API_KEY));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stdio_exits_cleanly_when_stdin_closes() {
    let upstream = FakeUpstream::start().await;
    let mut harness = StdioHarness::spawn(&upstream);
    let (mut stdin, mut reader) = harness.pipes();

    run_blocking(move || {
        handshake(&mut stdin, &mut reader);
        std::thread::sleep(Duration::from_millis(100));
        drop(stdin);
    })
    .await;

    let status = tokio::task::spawn_blocking(move || harness.wait_for_exit())
        .await
        .unwrap();
    assert!(status.success(), "expected exit code 0, got {:?}", status.code());
}

#[test]
fn test_missing_api_key_is_fatal() {
    let output = Command::new(env!("CARGO_BIN_EXE_portkey-mcp"))
        .arg("stdio")
        .env_remove("PORTKEY_API_KEY")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run portkey-mcp");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("PORTKEY_API_KEY"),
        "stderr should name the missing variable, got: {stderr}"
    );
}
