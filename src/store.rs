//! Keyed session store with per-session locking.
//!
//! The store is the engine's only shared mutable resource. Rather than one
//! global lock around a session map, each session lives behind its own
//! `tokio::sync::Mutex`: submissions for the same session serialize on that
//! mutex for the full validation-through-commit span, while submissions for
//! different sessions proceed independently. The outer `RwLock` only guards
//! map membership (insert/lookup), never session contents.

use rustc_hash::FxHashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::session::Session;

/// Shared handle to one session's lockable slot.
pub type SessionSlot = Arc<Mutex<Session>>;

/// In-memory store of all active and completed sessions.
///
/// Sessions are inserted at creation and never deleted by the engine itself;
/// expiry and cleanup are an external housekeeping concern.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<FxHashMap<String, SessionSlot>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly created session under its own lock.
    pub async fn insert(&self, session: Session) {
        let id = session.session_id.clone();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
    }

    /// Clone the current state of a session, if it exists.
    ///
    /// Briefly takes the session's own lock so readers never observe a
    /// half-committed state.
    pub async fn get(&self, session_id: &str) -> Option<Session> {
        let slot = self.slot(session_id).await?;
        let session = slot.lock().await;
        Some(session.clone())
    }

    /// Fetch the lockable slot for a session.
    ///
    /// Callers that mutate must hold the returned mutex from validation
    /// through commit; the map lock is released before this returns, so
    /// holding a slot never blocks other sessions.
    pub async fn slot(&self, session_id: &str) -> Option<SessionSlot> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Snapshot of all known session identifiers.
    pub async fn session_ids(&self) -> Vec<String> {
        self.sessions.read().await.keys().cloned().collect()
    }
}
