//! rmcp session manager that keeps the [`SessionStore`] in step with rmcp's
//! own per-request session table.
//!
//! Request routing is left to `LocalSessionManager`; this wrapper observes
//! the transitions (initialized, touched, closed) and records them in the
//! store so the idle sweeper and shutdown can find every live session.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use parking_lot::Mutex;
use rmcp::model::{ClientJsonRpcMessage, ServerJsonRpcMessage};
use rmcp::transport::common::server_side_http::ServerSseMessage;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::session::{SessionId, SessionManager};
use tokio::time::Instant;

use super::store::{SessionStore, SessionTransport};

type InnerError = <LocalSessionManager as SessionManager>::Error;

/// Store-side handle for one rmcp session. Closing it tears the session
/// down in rmcp's table; closing an already-closed session is a no-op.
pub struct ManagedTransport {
    id: SessionId,
    sessions: Arc<LocalSessionManager>,
}

impl ManagedTransport {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl SessionTransport for ManagedTransport {
    async fn close(&self) {
        if let Err(e) = self.sessions.close_session(&self.id).await {
            tracing::warn!(session_id = %self.id, error = %e, "failed to close session transport");
        }
    }
}

pub struct TrackedSessionManager {
    inner: Arc<LocalSessionManager>,
    store: SessionStore<ManagedTransport>,
    // Created by rmcp but not yet through the initialize handshake, with
    // the creation time so abandoned handshakes can be expired.
    pending: Mutex<HashMap<SessionId, Instant>>,
}

impl TrackedSessionManager {
    pub fn new(store: SessionStore<ManagedTransport>) -> Self {
        Self {
            inner: Arc::new(LocalSessionManager::default()),
            store,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &SessionStore<ManagedTransport> {
        &self.store
    }

    /// Whether `id` names a session that can still take requests.
    ///
    /// A store entry whose rmcp session has already gone away is dropped
    /// here, so the two tables never disagree for long.
    pub async fn is_live(&self, id: &str) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        let sid: SessionId = Arc::from(id);
        match self.inner.has_session(&sid).await {
            Ok(true) => true,
            _ => {
                self.forget(&sid).await;
                false
            }
        }
    }

    /// Number of sessions created but not yet initialized.
    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Close sessions whose initialize handshake never completed within
    /// `timeout` of creation. Returns the closed ids.
    pub async fn expire_pending(&self, timeout: Duration) -> Vec<String> {
        let now = Instant::now();
        let expired: Vec<SessionId> = {
            let mut pending = self.pending.lock();
            let ids: Vec<SessionId> = pending
                .iter()
                .filter(|(_, created)| now.saturating_duration_since(**created) > timeout)
                .map(|(id, _)| id.clone())
                .collect();
            for id in &ids {
                pending.remove(id);
            }
            ids
        };
        for id in &expired {
            self.close_pending(id).await;
        }
        expired.iter().map(|id| id.to_string()).collect()
    }

    /// Close every session, tracked or still mid-handshake.
    pub async fn shutdown(&self) {
        self.store.close_all().await;
        let pending: Vec<SessionId> = self.pending.lock().drain().map(|(id, _)| id).collect();
        for id in pending {
            self.close_pending(&id).await;
        }
    }

    async fn close_pending(&self, id: &SessionId) {
        if let Err(e) = self.inner.close_session(id).await {
            tracing::warn!(session_id = %id, error = %e, "failed to close pending session");
        }
    }

    pub(crate) fn on_initialized(&self, id: &SessionId) {
        self.pending.lock().remove(id);
        let transport = Arc::new(ManagedTransport {
            id: id.clone(),
            sessions: Arc::clone(&self.inner),
        });
        match self.store.set(id.to_string(), transport) {
            Ok(()) => tracing::info!(session_id = %id, "session initialized"),
            Err(e) => tracing::error!(session_id = %id, error = %e, "session registration failed"),
        }
    }

    async fn on_closed(&self, id: &SessionId) {
        self.pending.lock().remove(id);
        if self.store.delete(id).await {
            tracing::info!(session_id = %id, "session closed");
        }
    }

    async fn forget(&self, id: &SessionId) {
        if self.store.delete(id).await {
            tracing::debug!(session_id = %id, "dropped session missing from transport table");
        }
    }

    async fn initialize_session_impl(
        &self,
        id: &SessionId,
        message: ClientJsonRpcMessage,
    ) -> Result<ServerJsonRpcMessage, InnerError> {
        match self.inner.initialize_session(id, message).await {
            Ok(response) => {
                self.on_initialized(id);
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(session_id = %id, error = %e, "session initialize failed");
                self.pending.lock().remove(id);
                let _ = self.inner.close_session(id).await;
                Err(e)
            }
        }
    }

    async fn close_session_impl(&self, id: &SessionId) -> Result<(), InnerError> {
        self.on_closed(id).await;
        self.inner.close_session(id).await
    }

    async fn has_session_impl(&self, id: &SessionId) -> Result<bool, InnerError> {
        let live = self.inner.has_session(id).await?;
        if !live {
            self.forget(id).await;
        }
        Ok(live)
    }
}

impl SessionManager for TrackedSessionManager {
    type Error = InnerError;
    type Transport = <LocalSessionManager as SessionManager>::Transport;

    fn create_session(
        &self,
    ) -> impl Future<Output = Result<(SessionId, Self::Transport), Self::Error>> + Send {
        async move {
            let (id, transport) = self.inner.create_session().await?;
            self.pending.lock().insert(id.clone(), Instant::now());
            tracing::debug!(session_id = %id, "session created");
            Ok((id, transport))
        }
    }

    fn initialize_session(
        &self,
        id: &SessionId,
        message: ClientJsonRpcMessage,
    ) -> impl Future<Output = Result<ServerJsonRpcMessage, Self::Error>> + Send {
        self.initialize_session_impl(id, message)
    }

    fn has_session(
        &self,
        id: &SessionId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        self.has_session_impl(id)
    }

    fn close_session(
        &self,
        id: &SessionId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        self.close_session_impl(id)
    }

    fn create_stream(
        &self,
        id: &SessionId,
        message: ClientJsonRpcMessage,
    ) -> impl Future<
        Output = Result<impl Stream<Item = ServerSseMessage> + Send + Sync + 'static, Self::Error>,
    > + Send {
        async move {
            let stream = self.inner.create_stream(id, message).await?;
            self.store.touch(id);
            Ok(stream)
        }
    }

    fn accept_message(
        &self,
        id: &SessionId,
        message: ClientJsonRpcMessage,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        async move {
            self.inner.accept_message(id, message).await?;
            self.store.touch(id);
            Ok(())
        }
    }

    fn create_standalone_stream(
        &self,
        id: &SessionId,
    ) -> impl Future<
        Output = Result<impl Stream<Item = ServerSseMessage> + Send + Sync + 'static, Self::Error>,
    > + Send {
        async move {
            let stream = self.inner.create_standalone_stream(id).await?;
            self.store.touch(id);
            Ok(stream)
        }
    }

    fn resume(
        &self,
        id: &SessionId,
        last_event_id: String,
    ) -> impl Future<
        Output = Result<impl Stream<Item = ServerSseMessage> + Send + Sync + 'static, Self::Error>,
    > + Send {
        async move {
            let stream = self.inner.resume(id, last_event_id).await?;
            self.store.touch(id);
            Ok(stream)
        }
    }
}
