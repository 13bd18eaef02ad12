//! # Conference Data Refresh
//!
//! Decides when the conference feed should be fetched again and arms a
//! one-shot timer for it.
//!
//! The timer is re-armed only when the triggering state (offline flag,
//! session token, update counter) changes. Nothing re-arms it after it
//! fires, so refreshing stops until one of those inputs changes again.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::client::types::SessionToken;
use crate::store::{AppSlice, AppState};

/// What the refresh planner wants to happen next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshDecision {
    /// Offline mode; no fetch
    Skip,
    /// No data yet; fetch the full feed immediately
    FetchNow,
    /// Fetch changes since `since` after `delay`
    FetchAfter { since: String, delay: Duration },
}

/// Arguments handed to the fetch callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub since: Option<String>,
}

/// Plan the next refresh from the app slice.
pub fn plan_refresh(app: &AppSlice, default_delay: Duration) -> RefreshDecision {
    if app.offline_mode {
        return RefreshDecision::Skip;
    }

    let feed = app.feed.as_ref();
    match feed.and_then(|f| f.last_updated.clone()) {
        Some(since) => {
            let delay = feed
                .and_then(|f| f.next_try_in_ms)
                .filter(|ms| *ms > 0)
                .map_or(default_delay, Duration::from_millis);
            RefreshDecision::FetchAfter { since, delay }
        }
        None => RefreshDecision::FetchNow,
    }
}

/// State the timer reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTrigger {
    offline_mode: bool,
    token: Option<SessionToken>,
    update_data_counter: u64,
}

impl RefreshTrigger {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            offline_mode: state.app.offline_mode,
            token: state.auth.token.clone(),
            update_data_counter: state.app.update_data_counter,
        }
    }
}

/// One-shot refresh timer
#[derive(Debug)]
pub struct RefreshTimer {
    default_delay: Duration,
    last_trigger: Option<RefreshTrigger>,
    pending: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    pub fn new(default_delay: Duration) -> Self {
        Self {
            default_delay,
            last_trigger: None,
            pending: None,
        }
    }

    /// React to a new state snapshot.
    ///
    /// Returns `None` when the trigger is unchanged. Otherwise any pending
    /// fetch is cancelled and the new decision is carried out: `fetch` runs
    /// immediately for `FetchNow`, on a spawned task after the delay for
    /// `FetchAfter`, and not at all for `Skip`. Must be called inside a
    /// tokio runtime.
    pub fn on_state_change<F>(&mut self, state: &AppState, fetch: F) -> Option<RefreshDecision>
    where
        F: FnOnce(FetchRequest) + Send + 'static,
    {
        let trigger = RefreshTrigger::from_state(state);
        if self.last_trigger.as_ref() == Some(&trigger) {
            return None;
        }
        self.last_trigger = Some(trigger);
        self.cancel();

        let decision = plan_refresh(&state.app, self.default_delay);
        match &decision {
            RefreshDecision::Skip => tracing::debug!("Offline, not scheduling a refresh"),
            RefreshDecision::FetchNow => fetch(FetchRequest { since: None }),
            RefreshDecision::FetchAfter { since, delay } => {
                tracing::debug!("Refreshing changes since {} in {:?}", since, delay);
                let request = FetchRequest {
                    since: Some(since.clone()),
                };
                let delay = *delay;
                self.pending = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    fetch(request);
                }));
            }
        }
        Some(decision)
    }

    /// Abort a fetch that has not fired yet
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
