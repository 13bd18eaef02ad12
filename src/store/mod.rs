//! # Client Store
//!
//! Holds the client state and applies dispatched actions one at a time
//! through the pure [`reduce`] function.
//!
//! Components that only need to emit actions (the HTTP gateway, the auth
//! flow) take an `Arc<dyn Dispatch>` instead of the store itself.

mod state;

use std::sync::{Arc, Mutex, MutexGuard};

pub use state::{reduce, Action, AppSlice, AppState, AuthSlice, DataSource, FeedMeta};

/// Sink for dispatched actions
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, action: Action);
}

/// Shared, mutex-guarded application state
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<Mutex<AppState>>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AppState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        // The next state is fully built before it is stored, so a poisoned
        // lock still holds a whole state.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Dispatch for Store {
    fn dispatch(&self, action: Action) {
        tracing::debug!(?action, "dispatch");
        let mut state = self.lock();
        *state = reduce(&state, &action);
    }
}
