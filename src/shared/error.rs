//! Shared Error Types
//!
//! Error types for the HTTP gateway and the token storage backends.
//!
//! # Error Categories
//!
//! - `ApiError` - failures of an outbound API call (transport, status, decoding)
//! - `StorageError` - failures reading or writing the persisted session token
//!
//! # Usage
//!
//! ```rust
//! use opencon_client::shared::error::ApiError;
//!
//! let error = ApiError::status(502, "Bad Gateway");
//! assert_eq!(error.status_code(), Some(502));
//! ```
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread boundaries.
use thiserror::Error;

/// Errors returned by the API client
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, body read)
    #[error("Network error: {message}")]
    Network {
        /// Human-readable error message
        message: String,
    },

    /// The server answered with a non-2xx status
    #[error("Request failed with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, or the canonical reason when the body was unreadable
        body: String,
    },

    /// The response body did not match the expected shape
    #[error("Failed to parse response: {message}")]
    Decode {
        /// Human-readable error message
        message: String,
    },

    /// Reading or writing the persisted token failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The request URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if the server responded at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

/// Errors returned by token storage backends
#[derive(Debug, Error, Clone)]
pub enum StorageError {
    /// Underlying file access failed
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
    },

    /// The store file is not a JSON object of strings
    #[error("Serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },
}

impl StorageError {
    /// Create a new I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
