//! Application state slices and the actions that change them.

use serde::{Deserialize, Serialize};

use crate::client::types::SessionToken;

/// Where conference data is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    #[default]
    Primary,
    /// The primary server answered 502; reads go to the backup copy.
    Backup,
}

impl DataSource {
    pub fn is_backup(self) -> bool {
        matches!(self, Self::Backup)
    }
}

/// Refresh metadata returned with the conference feed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedMeta {
    pub last_updated: Option<String>,
    pub next_try_in_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthSlice {
    pub token: Option<SessionToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppSlice {
    pub push_notification_token: Option<String>,
    pub data_source: DataSource,
    pub offline_mode: bool,
    pub update_data_counter: u64,
    pub feed: Option<FeedMeta>,
}

/// Whole client state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub auth: AuthSlice,
    pub app: AppSlice,
}

/// Dispatched state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AuthorizeUser(SessionToken),
    ReadFromBackupServer,
    SetPushNotificationToken(Option<String>),
    SetOfflineMode(bool),
    FeedLoaded(FeedMeta),
    RequestDataUpdate,
}

/// Apply `action` to `state`, returning the next state.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::AuthorizeUser(token) => next.auth.token = Some(token.clone()),
        Action::ReadFromBackupServer => next.app.data_source = DataSource::Backup,
        Action::SetPushNotificationToken(token) => {
            next.app.push_notification_token = token.clone();
        }
        Action::SetOfflineMode(offline) => next.app.offline_mode = *offline,
        Action::FeedLoaded(meta) => next.app.feed = Some(meta.clone()),
        Action::RequestDataUpdate => {
            next.app.update_data_counter = next.app.update_data_counter.wrapping_add(1);
        }
    }
    next
}
