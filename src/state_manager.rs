//! Centralized State Management
//!
//! [`SessionStore`] is the single source of truth for the terminal session.
//! Every change replaces the published [`SessionState`] in one step, so
//! subscribers (the UI, tests) always observe whole snapshots and never a
//! half-applied update.
//!
//! ```text
//! TerminalSession ──update()──▶ SessionStore ──watch──▶ UI / subscribers
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::trace;

use crate::models::{HistoryEntry, SessionState};

/// Observable holder of the session state
#[derive(Debug)]
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    next_entry_id: AtomicU64,
}

impl SessionStore {
    pub fn new(initial: SessionState) -> Self {
        let next_entry_id = initial
            .history
            .iter()
            .map(|entry| entry.id + 1)
            .max()
            .unwrap_or(0);
        let (state, _) = watch::channel(initial);
        Self {
            state,
            next_entry_id: AtomicU64::new(next_entry_id),
        }
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Receiver notified after every change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Apply `f` as one atomic change and notify subscribers
    pub fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut result = None;
        self.state.send_modify(|state| result = Some(f(state)));
        trace!("Session state updated");
        match result {
            Some(result) => result,
            // send_modify always runs the closure
            None => unreachable!("state update closure did not run"),
        }
    }

    /// Replace the whole state
    pub fn replace(&self, state: SessionState) {
        self.state.send_replace(state);
    }

    /// Allocate an id for a new history entry
    pub fn next_entry_id(&self) -> u64 {
        self.next_entry_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Append an entry, returning its id
    pub fn push_entry(&self, entry: HistoryEntry) -> u64 {
        let id = entry.id;
        self.update(|state| state.history.push(entry));
        id
    }

    pub fn set_input(&self, input: &str) {
        self.update(|state| state.current_input = input.to_string());
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}
