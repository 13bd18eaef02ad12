use reqwest::Url;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use crate::shared::error::ApiError;

/// Environment variable overriding the primary server
pub const SERVER_URL_ENV: &str = "OPENCON_API_URL";

/// Throwaway base that request paths are resolved against before their path
/// and query are moved onto the configured server
const RESOLVE_BASE: &str = "http://resolve.invalid/";

/// Client configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        let mut builder = AppConfig::builder();
        if let Ok(server_url) = std::env::var(SERVER_URL_ENV) {
            builder = builder.server_url(server_url);
        }
        let app = builder.build().unwrap_or_else(|err| {
            tracing::warn!("Ignoring {}: {}", SERVER_URL_ENV, err);
            AppConfig::default()
        });
        Self { app }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self {
            app: builder.build()?,
        })
    }

    /// Get the full URL for an API endpoint.
    ///
    /// Only the path and query of `path` are kept, whatever scheme or host it
    /// names. They are appended to the server URL, so a path prefix on the
    /// configured server survives and the host never changes.
    pub fn api_url(&self, path: &str) -> Result<Url, ApiError> {
        let requested = Url::parse(RESOLVE_BASE)
            .and_then(|base| base.join(path))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))?;

        let mut url = self.app.server_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        let tail = requested.path().trim_start_matches('/');
        url.set_path(&format!("{}/{}", prefix, tail));
        url.set_query(requested.query());
        url.set_fragment(None);
        Ok(url)
    }

    pub fn server_url(&self) -> &Url {
        &self.app.server_url
    }

    pub fn backup_trigger_status(&self) -> u16 {
        self.app.backup_trigger_status
    }

    pub fn token_key(&self) -> &str {
        &self.app.token_key
    }

    pub fn refresh_delay(&self) -> std::time::Duration {
        self.app.refresh_delay
    }
}
