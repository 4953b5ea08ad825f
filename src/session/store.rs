use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;

/// A per-session transport the store can shut down.
///
/// `close` may be called more than once (store eviction and the transport's
/// own close path can race) and must tolerate that.
pub trait SessionTransport: Send + Sync + 'static {
    fn close(&self) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session already exists: {0}")]
    DuplicateId(String),
}

struct Entry<T> {
    transport: Arc<T>,
    created_at: Instant,
    last_activity: Instant,
}

/// Point-in-time view of one session, for logging and diagnostics.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub id: String,
    pub created_at: Instant,
    pub last_activity: Instant,
}

/// Live HTTP sessions keyed by session id.
///
/// Every map mutation happens in one critical section; transports are always
/// closed after their entry has left the map, never under the lock.
pub struct SessionStore<T> {
    inner: Arc<RwLock<HashMap<String, Entry<T>>>>,
}

impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: SessionTransport> Default for SessionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SessionTransport> SessionStore<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a new session. Ids are never reused, so a duplicate is a bug
    /// upstream and is refused rather than overwritten.
    pub fn set(&self, id: impl Into<String>, transport: Arc<T>) -> Result<(), SessionStoreError> {
        let id = id.into();
        let mut sessions = self.inner.write();
        if sessions.contains_key(&id) {
            return Err(SessionStoreError::DuplicateId(id));
        }
        let now = Instant::now();
        sessions.insert(
            id,
            Entry {
                transport,
                created_at: now,
                last_activity: now,
            },
        );
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.inner.read().get(id).map(|e| Arc::clone(&e.transport))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().contains_key(id)
    }

    /// Record activity on a session. Returns `false` if it is not live.
    pub fn touch(&self, id: &str) -> bool {
        match self.inner.write().get_mut(id) {
            Some(entry) => {
                let now = Instant::now();
                if now > entry.last_activity {
                    entry.last_activity = now;
                }
                true
            }
            None => false,
        }
    }

    pub fn info(&self, id: &str) -> Option<SessionInfo> {
        self.inner.read().get(id).map(|e| SessionInfo {
            id: id.to_string(),
            created_at: e.created_at,
            last_activity: e.last_activity,
        })
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Remove a session and close its transport.
    ///
    /// Returns `false` when the id was not live (already closed, expired or
    /// never existed).
    pub async fn delete(&self, id: &str) -> bool {
        let removed = self.inner.write().remove(id);
        match removed {
            Some(entry) => {
                entry.transport.close().await;
                true
            }
            None => false,
        }
    }

    /// Evict every session idle for longer than `timeout`, closing its
    /// transport. Returns the evicted ids.
    ///
    /// Idle time is measured against one snapshot of "now" taken under the
    /// lock, so a `touch` that lands before the sweep keeps its session.
    pub async fn cleanup(&self, timeout: Duration) -> Vec<String> {
        let expired: Vec<(String, Arc<T>)> = {
            let mut sessions = self.inner.write();
            let now = Instant::now();
            let ids: Vec<String> = sessions
                .iter()
                .filter(|(_, e)| now.saturating_duration_since(e.last_activity) > timeout)
                .map(|(id, _)| id.clone())
                .collect();
            ids.into_iter()
                .filter_map(|id| sessions.remove(&id).map(|e| (id, e.transport)))
                .collect()
        };

        futures::future::join_all(expired.iter().map(|(_, t)| t.close())).await;
        expired.into_iter().map(|(id, _)| id).collect()
    }

    /// Close every live transport and empty the store.
    pub async fn close_all(&self) {
        let drained: Vec<Arc<T>> = {
            let mut sessions = self.inner.write();
            sessions.drain().map(|(_, e)| e.transport).collect()
        };
        futures::future::join_all(drained.iter().map(|t| t.close())).await;
    }
}
