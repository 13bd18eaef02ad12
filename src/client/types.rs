/**
 * API Types Module
 *
 * Request and response bodies for the authorization endpoints, the session
 * token newtype and the outcome of the start-up authorization flow.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::config::DEFAULT_DUMMY_TOKEN;

/// Opaque bearer credential
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Placeholder used when authorization could not complete
    pub fn dummy() -> Self {
        Self::new(DEFAULT_DUMMY_TOKEN)
    }

    pub fn is_dummy(&self) -> bool {
        self.0 == DEFAULT_DUMMY_TOKEN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dummy() {
            f.write_str("SessionToken(dummy)")
        } else {
            f.write_str("SessionToken(***)")
        }
    }
}

/// Body of `POST /api/authorize`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_notification_token: Option<String>,
}

/// Response of `POST /api/authorize`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizeResponse {
    pub token: String,
}

/// Where the start-up authorization flow currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    NoToken,
    HasToken,
    Authorized,
    AuthorizedDummy,
}

/// Terminal state of the authorization flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authorized(SessionToken),
    AuthorizedDummy,
}

impl AuthOutcome {
    /// Token the app should continue with
    pub fn token(&self) -> SessionToken {
        match self {
            Self::Authorized(token) => token.clone(),
            Self::AuthorizedDummy => SessionToken::dummy(),
        }
    }

    pub fn phase(&self) -> AuthPhase {
        match self {
            Self::Authorized(_) => AuthPhase::Authorized,
            Self::AuthorizedDummy => AuthPhase::AuthorizedDummy,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::AuthorizedDummy)
    }
}
