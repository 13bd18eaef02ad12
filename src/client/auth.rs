/**
 * Authorization Module
 *
 * Start-up authorization: reuse the stored session token when the server
 * still accepts it, otherwise request a new one. The flow always ends in a
 * token state; failures fall back to the dummy token so the app stays usable.
 */

use serde_json::Value;

use crate::client::gateway::ApiClient;
use crate::client::types::{AuthOutcome, AuthPhase, AuthorizeRequest, AuthorizeResponse, SessionToken};
use crate::shared::error::ApiError;
use crate::store::{Action, AppState};

pub const AUTHORIZE_PATH: &str = "/api/authorize";
pub const ME_PATH: &str = "/api/me";

/// Runs the authorization flow over an `ApiClient`
#[derive(Clone)]
pub struct AuthFlow {
    client: ApiClient,
}

impl AuthFlow {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Validate the stored token or obtain a new one.
    pub async fn authorize_user(&self, push_notification_token: Option<&str>) -> AuthOutcome {
        let key = self.client.config().token_key();
        let stored = match self.client.storage().get_item(key).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Could not read stored token, re-authorizing: {}", e);
                None
            }
        };

        let phase = if stored.is_some() {
            AuthPhase::HasToken
        } else {
            AuthPhase::NoToken
        };
        tracing::debug!(?phase, "authorize_user");

        let Some(stored) = stored else {
            return self.authorize(push_notification_token).await;
        };

        if !self.check_token().await {
            tracing::info!("Stored token rejected, re-authorizing");
            return self.authorize(push_notification_token).await;
        }

        let token = SessionToken::new(stored);
        self.client
            .dispatcher()
            .dispatch(Action::AuthorizeUser(token.clone()));
        tracing::info!("Authorized with stored token");
        AuthOutcome::Authorized(token)
    }

    /// `authorize_user` with the push notification token held in `state`.
    pub async fn authorize_from_state(&self, state: &AppState) -> AuthOutcome {
        self.authorize_user(state.app.push_notification_token.as_deref())
            .await
    }

    /// Request a new session token, persisting it on success.
    pub async fn authorize(&self, push_notification_token: Option<&str>) -> AuthOutcome {
        let outcome = match self.request_token(push_notification_token).await {
            Ok(token) => {
                tracing::info!("Authorized with new token");
                AuthOutcome::Authorized(token)
            }
            Err(e) => {
                tracing::warn!("Authorization failed, continuing with dummy token: {}", e);
                AuthOutcome::AuthorizedDummy
            }
        };

        self.client
            .dispatcher()
            .dispatch(Action::AuthorizeUser(outcome.token()));
        outcome
    }

    async fn request_token(
        &self,
        push_notification_token: Option<&str>,
    ) -> Result<SessionToken, ApiError> {
        let request = AuthorizeRequest {
            push_notification_token: push_notification_token.map(str::to_string),
        };
        let response: AuthorizeResponse = self.client.post_json(AUTHORIZE_PATH, &request).await?;
        if response.token.is_empty() {
            return Err(ApiError::decode("authorize response carried an empty token"));
        }

        self.client
            .storage()
            .set_item(self.client.config().token_key(), &response.token)
            .await?;
        Ok(SessionToken::new(response.token))
    }

    /// Whether `/api/me` accepts the stored token.
    pub async fn check_token(&self) -> bool {
        match self.client.get_json::<Value>(ME_PATH).await {
            Ok(user) => is_truthy(&user),
            Err(e) => {
                tracing::debug!("Token check failed: {}", e);
                false
            }
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("user")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({"id": 7})));
    }
}
