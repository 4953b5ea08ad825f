//! Process lifecycle for HTTP mode: the periodic idle sweep and the
//! coordinated shutdown that runs on SIGINT/SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::AppState;
use crate::config::HttpConfig;
use crate::session::TrackedSessionManager;

pub struct Lifecycle {
    state: AppState,
    session_timeout: Duration,
    sweep_interval: Duration,
    cancel: CancellationToken,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl Lifecycle {
    pub fn new(state: AppState, config: &HttpConfig) -> Self {
        Self {
            state,
            session_timeout: config.session_timeout,
            sweep_interval: config.sweep_interval,
            cancel: CancellationToken::new(),
            sweeper: Mutex::new(None),
        }
    }

    /// Start the idle sweeper and mark the server ready.
    pub fn start(&self) {
        let sessions = Arc::clone(&self.state.sessions);
        let handle = tokio::spawn(run_sweeper(
            sessions,
            self.session_timeout,
            self.sweep_interval,
            self.cancel.clone(),
        ));
        *self.sweeper.lock() = Some(handle);
        self.state.set_ready(true);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.state.is_shutting_down()
    }

    /// Run one idle sweep now. Returns the expired session ids, including
    /// handshakes that were abandoned before initialize completed.
    pub async fn sweep(&self) -> Vec<String> {
        sweep(&self.state.sessions, self.session_timeout).await
    }

    /// Stop taking work and close every session.
    ///
    /// Order: `/mcp` closed to new work, readiness off, sweeper cancelled
    /// and joined, all sessions closed. Only the first call does anything;
    /// later calls return `false`.
    pub async fn shutdown(&self) -> bool {
        if !self.state.begin_shutdown() {
            tracing::debug!("shutdown already in progress");
            return false;
        }

        tracing::info!("shutting down gracefully");
        self.state.set_ready(false);

        self.cancel.cancel();
        let sweeper = self.sweeper.lock().take();
        if let Some(handle) = sweeper {
            if let Err(e) = handle.await {
                tracing::warn!(?e, "idle sweeper task panicked");
            }
        }

        let open = self.state.sessions.store().len();
        self.state.sessions.shutdown().await;
        tracing::info!(sessions = open, "all sessions closed");
        true
    }
}

async fn sweep(sessions: &TrackedSessionManager, timeout: Duration) -> Vec<String> {
    let mut expired = sessions.store().cleanup(timeout).await;
    for id in &expired {
        tracing::info!(session_id = %id, "session expired");
    }
    let abandoned = sessions.expire_pending(timeout).await;
    for id in &abandoned {
        tracing::info!(session_id = %id, "uninitialized session expired");
    }
    expired.extend(abandoned);
    expired
}

async fn run_sweeper(
    sessions: Arc<TrackedSessionManager>,
    timeout: Duration,
    interval: Duration,
    cancel: CancellationToken,
) {
    let start = tokio::time::Instant::now() + interval;
    let mut ticker = tokio::time::interval_at(start, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("idle sweeper stopped");
                return;
            }
            _ = ticker.tick() => {
                sweep(&sessions, timeout).await;
            }
        }
    }
}

/// Wait for SIGINT or SIGTERM and return the signal's name.
pub async fn wait_for_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(e) => {
                tracing::warn!(?e, "cannot listen for SIGTERM, falling back to Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
                return "SIGINT";
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => "SIGINT",
            _ = term.recv() => "SIGTERM",
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        "SIGINT"
    }
}
