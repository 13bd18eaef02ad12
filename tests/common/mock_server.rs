//! Mock server helpers for integration tests
//!
//! Builds API clients pointed at a `wiremock` server, with in-memory token
//! storage and a dispatcher that records every action.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use opencon_client::client::{ApiClient, Config, MemoryStorage, TokenStorage};
use opencon_client::shared::{AppConfig, StorageError};
use opencon_client::store::{Action, Dispatch};
use wiremock::MockServer;

/// Dispatcher that keeps every action it receives
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    actions: Mutex<Vec<Action>>,
}

impl RecordingDispatcher {
    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    pub fn count(&self, action: &Action) -> usize {
        self.actions().iter().filter(|a| *a == action).count()
    }
}

impl Dispatch for RecordingDispatcher {
    fn dispatch(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }
}

/// Client plus the collaborators a test wants to inspect
pub struct TestClient {
    pub client: ApiClient,
    pub storage: Arc<MemoryStorage>,
    pub dispatcher: Arc<RecordingDispatcher>,
}

impl TestClient {
    pub async fn stored_token(&self) -> Option<String> {
        self.storage.get_item("jwt").await.unwrap()
    }
}

/// Storage whose reads or writes fail with an I/O error
#[derive(Debug, Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingStorage {
    /// Every read fails
    pub fn unreadable() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Reads succeed, every write fails
    pub fn read_only() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// What actually got stored, bypassing the failure switches
    pub async fn stored(&self, key: &str) -> Option<String> {
        self.inner.get_item(key).await.unwrap()
    }
}

#[async_trait]
impl TokenStorage for FailingStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::io("secure store locked"));
        }
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::io("secure store is read-only"));
        }
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::io("secure store is read-only"));
        }
        self.inner.remove_item(key).await
    }
}

/// Client against `server` backed by `storage`, plus its recording dispatcher
pub fn client_with_failing_storage(
    server: &MockServer,
    storage: Arc<FailingStorage>,
) -> (ApiClient, Arc<RecordingDispatcher>) {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let client = ApiClient::new(config_for(&server.uri()), storage, dispatcher.clone());
    (client, dispatcher)
}

pub fn config_for(base_url: &str) -> Config {
    Config::with_builder(AppConfig::builder().server_url(base_url)).unwrap()
}

/// Client against `server` with no stored token
pub fn client_for(server: &MockServer) -> TestClient {
    client_with_storage(&server.uri(), MemoryStorage::new())
}

/// Client against `server` with `token` already stored under `"jwt"`
pub fn client_with_token(server: &MockServer, token: &str) -> TestClient {
    client_with_storage(&server.uri(), MemoryStorage::with_item("jwt", token))
}

pub fn client_with_storage(base_url: &str, storage: MemoryStorage) -> TestClient {
    let storage = Arc::new(storage);
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let client = ApiClient::new(config_for(base_url), storage.clone(), dispatcher.clone());
    TestClient {
        client,
        storage,
        dispatcher,
    }
}

/// Base URL on which nothing is listening
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
