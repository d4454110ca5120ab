//! In-memory session store with a capped rolling history.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::types::Turn;

/// Maximum retained turns per session (10 user/assistant exchanges).
/// On overflow the oldest turns are dropped first.
pub const MAX_HISTORY: usize = 20;

/// Session id used when the caller supplies none.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Process-wide map from session id to its ordered turn history.
///
/// Cheap to clone; clones share state. Sessions are created lazily on first
/// append and live for the process lifetime — there is no eviction of idle
/// sessions. The lock is never held across an await point: callers snapshot
/// history with [`SessionStore::history`] before any network call.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Vec<Turn>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the history for a session, oldest turn first.
    /// Unknown ids yield an empty history.
    pub fn history(&self, session_id: &str) -> Vec<Turn> {
        self.inner
            .read()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Append turns to a session, then truncate to the most recent
    /// [`MAX_HISTORY`] entries.
    pub fn append(&self, session_id: &str, turns: impl IntoIterator<Item = Turn>) {
        let mut map = self.inner.write().unwrap();
        let history = map.entry(session_id.to_string()).or_default();
        history.extend(turns);
        if history.len() > MAX_HISTORY {
            let excess = history.len() - MAX_HISTORY;
            history.drain(..excess);
        }
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.inner.read().unwrap().len()
    }
}
