//! # API Client
//!
//! HTTP access to the conference backend.
//!
//! - [`gateway::ApiClient`] attaches the stored bearer token, pins requests to
//!   the configured server and signals backup mode on 502
//! - [`auth::AuthFlow`] validates or renews the session token at start-up
//! - [`storage`] persists the token
//! - [`refresh::RefreshTimer`] schedules the next conference data fetch
//! - [`links`] opens session URLs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use opencon_client::client::{ApiClient, AuthFlow, Config, MemoryStorage};
//! use opencon_client::store::{Action, Dispatch, Store};
//!
//! # async fn example() {
//! let store = Store::default();
//! store.dispatch(Action::SetPushNotificationToken(Some("ExponentPushToken[x]".into())));
//! let client = ApiClient::new(Config::new(), Arc::new(MemoryStorage::new()), Arc::new(store.clone()));
//! let outcome = AuthFlow::new(client).authorize_from_state(&store.state()).await;
//! assert_eq!(store.state().auth.token, Some(outcome.token()));
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod gateway;
pub mod links;
pub mod refresh;
pub mod storage;
pub mod types;

pub use auth::AuthFlow;
pub use config::Config;
pub use gateway::{ApiClient, RequestContext};
pub use refresh::{plan_refresh, FetchRequest, RefreshDecision, RefreshTimer};
pub use storage::{FileStorage, MemoryStorage, TokenStorage};
pub use types::{AuthOutcome, AuthPhase, AuthorizeRequest, AuthorizeResponse, SessionToken};
