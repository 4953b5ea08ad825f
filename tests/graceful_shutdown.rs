//! Integration test for graceful shutdown of `portkey-mcp serve`.
//!
//! This test verifies that on SIGTERM the server stops reporting ready,
//! closes its sessions and exits with status 0 instead of being torn down
//! mid-request.

mod common;

use std::process::{Child, Command, Stdio};
use std::time::Duration;

use common::{FakeUpstream, TEST_API_KEY};

const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_millis(50);

struct ServerProcess {
    child: Child,
    port: u16,
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn spawn_server(upstream: &FakeUpstream) -> ServerProcess {
    // Find an available port
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let child = Command::new(env!("CARGO_BIN_EXE_portkey-mcp"))
        .arg("serve")
        .arg("--port")
        .arg(port.to_string())
        .env("PORTKEY_API_KEY", TEST_API_KEY)
        .env("PORTKEY_BASE_URL", upstream.base_url())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn portkey-mcp serve");

    ServerProcess { child, port }
}

/// Waits for the server to be ready by polling the readiness endpoint.
async fn wait_for_ready(port: u16) -> Result<(), &'static str> {
    let url = format!("http://127.0.0.1:{}/ready", port);
    let client = reqwest::Client::new();

    let deadline = tokio::time::Instant::now() + STARTUP_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status().is_success() {
                return Ok(());
            }
        }
        tokio::time::sleep(HEALTH_POLL_INTERVAL).await;
    }
    Err("portkey-mcp did not become ready in time")
}

async fn wait_for_exit(child: &mut Child) -> std::process::ExitStatus {
    let deadline = tokio::time::Instant::now() + SHUTDOWN_TIMEOUT;
    loop {
        if let Some(status) = child.try_wait().expect("try_wait failed") {
            return status;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("portkey-mcp did not exit within {SHUTDOWN_TIMEOUT:?}");
        }
        tokio::time::sleep(HEALTH_POLL_INTERVAL).await;
    }
}

fn send_signal(child: &Child, signal: libc::c_int) {
    let rc = unsafe { libc::kill(child.id() as libc::pid_t, signal) };
    assert_eq!(rc, 0, "failed to signal child");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sigterm_closes_sessions_and_exits_cleanly() {
    let upstream = FakeUpstream::start().await;
    let mut server = spawn_server(&upstream);
    wait_for_ready(server.port)
        .await
        .expect("portkey-mcp should become ready");

    let addr = format!("127.0.0.1:{}", server.port).parse().unwrap();
    let client = reqwest::Client::new();
    common::open_session(&client, addr).await;

    let ready: serde_json::Value = client
        .get(format!("http://{addr}/ready"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ready["sessions"], 1);

    send_signal(&server.child, libc::SIGTERM);
    let status = wait_for_exit(&mut server.child).await;
    assert!(status.success(), "expected exit code 0, got {:?}", status.code());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sigint_without_sessions_exits_cleanly() {
    let upstream = FakeUpstream::start().await;
    let mut server = spawn_server(&upstream);
    wait_for_ready(server.port)
        .await
        .expect("portkey-mcp should become ready");

    send_signal(&server.child, libc::SIGINT);
    let status = wait_for_exit(&mut server.child).await;
    assert!(status.success(), "expected exit code 0, got {:?}", status.code());
}
