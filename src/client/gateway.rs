/**
 * API Gateway
 *
 * Every outbound call goes through `ApiClient`: the stored session token is
 * attached as a bearer credential, the destination is pinned to the
 * configured server, and a 502 answer switches the app to the backup data
 * source before the error is handed back to the caller.
 */

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::config::Config;
use crate::client::storage::TokenStorage;
use crate::shared::error::ApiError;
use crate::store::{Action, Dispatch};

/// Method, path and optional JSON body of one outbound call
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl RequestContext {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// HTTP client with token injection and backup failover
#[derive(Clone)]
pub struct ApiClient {
    config: Config,
    http: Client,
    storage: Arc<dyn TokenStorage>,
    dispatcher: Arc<dyn Dispatch>,
}

impl ApiClient {
    pub fn new(config: Config, storage: Arc<dyn TokenStorage>, dispatcher: Arc<dyn Dispatch>) -> Self {
        Self::with_http_client(Client::new(), config, storage, dispatcher)
    }

    pub fn with_http_client(
        http: Client,
        config: Config,
        storage: Arc<dyn TokenStorage>,
        dispatcher: Arc<dyn Dispatch>,
    ) -> Self {
        Self {
            config,
            http,
            storage,
            dispatcher,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn TokenStorage> {
        &self.storage
    }

    pub fn dispatcher(&self) -> &Arc<dyn Dispatch> {
        &self.dispatcher
    }

    /// Build a request against the configured server, with the stored token
    /// as bearer credential when one exists.
    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.config.api_url(path)?;
        let token = self.storage.get_item(self.config.token_key()).await?;

        let builder = self.http.request(method, url);
        Ok(match token.filter(|t| !t.is_empty()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send a prepared request.
    ///
    /// Non-2xx answers become `ApiError::Status`. When the status is the
    /// backup trigger, `ReadFromBackupServer` is dispatched first.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!("Request failed before a response: {}", e);
            ApiError::network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == self.config.backup_trigger_status() {
            tracing::warn!(
                "{} from {}, switching to backup server",
                status,
                response.url().path()
            );
            self.dispatcher.dispatch(Action::ReadFromBackupServer);
        }

        let body = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ApiError::status(status.as_u16(), body))
    }

    pub async fn send(&self, context: RequestContext) -> Result<Response, ApiError> {
        tracing::debug!("{} {}", context.method, context.path);
        let mut request = self.request(context.method, &context.path).await?;
        if let Some(body) = context.body {
            request = request.json(&body);
        }
        self.execute(request).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(RequestContext::get(path)).await?;
        decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::decode(e.to_string()))?;
        let response = self.send(RequestContext::post(path, body)).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::decode(e.to_string()))
}
