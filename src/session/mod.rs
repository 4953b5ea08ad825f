//! HTTP session bookkeeping: the idle-aware [`SessionStore`] and the rmcp
//! session manager that feeds it.

pub mod manager;
pub mod store;

pub use manager::{ManagedTransport, TrackedSessionManager};
pub use store::{SessionInfo, SessionStore, SessionStoreError, SessionTransport};
