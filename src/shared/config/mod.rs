//! Application configuration module
//!
//! Provides configuration types for the API gateway and data refresh.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Primary API host
pub const DEFAULT_SERVER_URL: &str = "https://m.opencon.dev";

/// Status code that switches the app to the backup data source
pub const DEFAULT_BACKUP_TRIGGER_STATUS: u16 = 502;

/// Placeholder token dispatched when authorization fails
pub const DEFAULT_DUMMY_TOKEN: &str = "dummy";

/// Secure storage key holding the session token
pub const DEFAULT_TOKEN_KEY: &str = "jwt";

/// Delay before re-fetching conference data when the server gives none
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(300_000);

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server URL
    pub server_url: Url,
    /// Response status that triggers backup mode
    pub backup_trigger_status: u16,
    /// Storage key of the session token
    pub token_key: String,
    /// Fallback delay between conference data refreshes
    pub refresh_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: Url::parse(DEFAULT_SERVER_URL).expect("default server URL is valid"),
            backup_trigger_status: DEFAULT_BACKUP_TRIGGER_STATUS,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            refresh_delay: DEFAULT_REFRESH_DELAY,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.server_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(self.server_url.to_string()));
        }
        if !(400..=599).contains(&self.backup_trigger_status) {
            return Err(ConfigError::InvalidStatus(self.backup_trigger_status));
        }
        if self.token_key.is_empty() {
            return Err(ConfigError::MissingValue("token_key"));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    backup_trigger_status: Option<u16>,
    token_key: Option<String>,
    refresh_delay: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the status code that triggers backup mode
    pub fn backup_trigger_status(mut self, status: u16) -> Self {
        self.backup_trigger_status = Some(status);
        self
    }

    /// Set the storage key of the session token
    pub fn token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = Some(key.into());
        self
    }

    /// Set the fallback refresh delay
    pub fn refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = Some(delay);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let server_url = match self.server_url {
            Some(raw) => Url::parse(&raw).map_err(|_| ConfigError::InvalidUrl(raw))?,
            None => defaults.server_url,
        };

        let config = AppConfig {
            server_url,
            backup_trigger_status: self
                .backup_trigger_status
                .unwrap_or(defaults.backup_trigger_status),
            token_key: self.token_key.unwrap_or(defaults.token_key),
            refresh_delay: self.refresh_delay.unwrap_or(defaults.refresh_delay),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid backup trigger status: {0}")]
    InvalidStatus(u16),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
