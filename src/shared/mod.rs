//! Shared Module
//!
//! Configuration and error types used by both the markup renderer consumers
//! and the API gateway.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{ApiError, StorageError};
