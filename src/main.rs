//! portkey-mcp - Portkey admin API as an MCP server
//!
//! ## Modes
//!
//! **Stdio** (default, or `portkey-mcp stdio`): speaks MCP over
//! stdin/stdout for hosts that launch the server as a child process. One
//! implicit session, no session store.
//!
//! **HTTP** (`portkey-mcp serve`): streamable HTTP on `/mcp` with session
//! tracking, idle expiry and `/health` + `/ready` probes. Shuts down cleanly
//! on SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser as ClapParser, Subcommand};
use rmcp::{transport::stdio, ServiceExt};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portkey_mcp::{
    api,
    config::{ApiConfig, ConfigError, HttpConfig},
    lifecycle::{self, Lifecycle},
    mcp::PortkeyMcpServer,
    portkey::{ClientError, PortkeyClient},
    session::{SessionStore, TrackedSessionManager},
};

/// How long in-flight HTTP connections get to drain once shutdown begins.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Portkey admin and prompt-management API exposed as MCP tools.
#[derive(ClapParser, Debug)]
#[command(name = "portkey-mcp", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    api: ApiArgs,
}

#[derive(Args, Debug)]
struct ApiArgs {
    /// Portkey API key sent as `x-portkey-api-key`
    #[arg(long, env = "PORTKEY_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Portkey API base URL
    #[arg(long, env = "PORTKEY_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Upstream request timeout in milliseconds
    #[arg(long, env = "PORTKEY_TIMEOUT_MS", default_value_t = 30_000, global = true)]
    timeout_ms: u64,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve MCP over stdin/stdout
    Stdio,

    /// Serve MCP over streamable HTTP
    Serve {
        /// Host to listen on
        #[arg(long, env = "MCP_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, env = "MCP_PORT", default_value_t = 3000)]
        port: u16,

        /// Idle time in milliseconds before a session is expired
        #[arg(long, env = "MCP_SESSION_TIMEOUT_MS", default_value_t = 1_800_000)]
        session_timeout_ms: u64,

        /// Interval in milliseconds between idle-session sweeps
        #[arg(long, env = "MCP_SWEEP_INTERVAL_MS", default_value_t = 60_000)]
        sweep_interval_ms: u64,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    #[error("mcp error: {0}")]
    Mcp(String),

    #[error("task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // Stdio mode: tracing must use stderr since stdout is for MCP protocol
    match cli.command {
        Some(Commands::Serve { .. }) => init_tracing(),
        _ => init_tracing_stderr(),
    }

    let api_config = ApiConfig::new(
        cli.api.api_key,
        cli.api.base_url,
        Duration::from_millis(cli.api.timeout_ms),
    )
    .unwrap_or_else(|e| exit_with_config_error(e));
    let client = Arc::new(PortkeyClient::new(&api_config)?);

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            session_timeout_ms,
            sweep_interval_ms,
        }) => {
            let http = HttpConfig {
                host,
                port,
                session_timeout: Duration::from_millis(session_timeout_ms),
                sweep_interval: Duration::from_millis(sweep_interval_ms),
            };
            let addr = http.validate().unwrap_or_else(|e| exit_with_config_error(e));
            run_http(client, http, addr).await
        }
        Some(Commands::Stdio) | None => run_stdio(client).await,
    }
}

/// Configuration errors are fatal before anything is bound.
fn exit_with_config_error(e: ConfigError) -> ! {
    eprintln!("portkey-mcp: {}", e);
    std::process::exit(1);
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "portkey_mcp=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize tracing with stderr output.
///
/// Stdio mode uses stdout for the JSON-RPC protocol, so all tracing MUST go
/// to stderr to avoid corrupting the protocol stream.
fn init_tracing_stderr() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "portkey_mcp=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ── HTTP mode ──────────────────────────────────────────────────────

async fn run_http(
    client: Arc<PortkeyClient>,
    http: HttpConfig,
    addr: SocketAddr,
) -> Result<(), AppError> {
    tracing::info!(base_url = %client.base_url(), "portkey-mcp HTTP server starting");

    let sessions = Arc::new(TrackedSessionManager::new(SessionStore::new()));
    let state = api::AppState::new(sessions);
    let app = api::router(state.clone(), client);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let lifecycle = Lifecycle::new(state, &http);
    lifecycle.start();
    tracing::info!(
        addr = %local_addr,
        session_timeout = ?http.session_timeout,
        sweep_interval = ?http.sweep_interval,
        "HTTP server listening"
    );

    let (server_shutdown_tx, server_shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let http_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                server_shutdown_rx.await.ok();
            })
            .await
    });

    let signal = lifecycle::wait_for_signal().await;
    tracing::info!(signal, "received shutdown signal");

    // Stop accepting connections first, then close sessions so that open
    // SSE streams end and the server can drain.
    let _ = server_shutdown_tx.send(());
    lifecycle.shutdown().await;

    match tokio::time::timeout(DRAIN_TIMEOUT, http_handle).await {
        Ok(joined) => joined??,
        Err(_) => tracing::warn!("HTTP connections did not drain in time"),
    }

    tracing::info!("portkey-mcp exiting");
    Ok(())
}

// ── Stdio mode ─────────────────────────────────────────────────────

async fn run_stdio(client: Arc<PortkeyClient>) -> Result<(), AppError> {
    tracing::info!(base_url = %client.base_url(), "portkey-mcp stdio server starting");

    let service = PortkeyMcpServer::new(client)
        .serve(stdio())
        .await
        .map_err(|e| AppError::Mcp(e.to_string()))?;

    let cancel = service.cancellation_token();
    tokio::spawn(async move {
        let signal = lifecycle::wait_for_signal().await;
        tracing::info!(signal, "received shutdown signal");
        cancel.cancel();
    });

    let reason = service.waiting().await?;
    tracing::info!(?reason, "portkey-mcp stdio server exiting");
    Ok(())
}
