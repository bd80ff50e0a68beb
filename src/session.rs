//! Session store
//!
//! Holds the signed-in user for the lifetime of the process. The store is
//! a cheap clonable handle passed to each view; there is no global.
//! Subscribers see every identity change.

use std::sync::Arc;
use tokio::sync::watch;

use crate::error::{ClientError, ClientResult};
use crate::models::Session;

/// Shown instead of data when a view needs an identity and has none
pub const LOGIN_PROMPT: &str = "Please log in to access your applications.";

/// Shared handle to the current session
#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current session
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Route guard: the current session or [`ClientError::NoSession`]
    pub fn require(&self) -> ClientResult<Session> {
        self.current().ok_or(ClientError::NoSession)
    }

    /// Store a freshly authenticated session
    pub fn login(&self, session: Session) {
        tracing::info!(user_id = %session.user_id, "Session started");
        self.tx.send_replace(Some(session));
    }

    /// Forget the current session
    pub fn logout(&self) {
        if let Some(previous) = self.tx.send_replace(None) {
            tracing::info!(user_id = %previous.user_id, "Session ended");
        }
    }

    /// Receiver that wakes on every login/logout
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}
