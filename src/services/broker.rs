// SPDX-License-Identifier: MIT

//! Client for the auth broker, used by the client-facing service.
//!
//! Owns the token lifecycle: handlers call
//! [`AuthBrokerClient::ensure_valid_access_token`] with their session
//! and get back a usable bearer token, refreshed through the broker
//! when the stored one has expired.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::session::Session;

/// Token endpoint response relayed by the broker.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Absent when the provider chose not to rotate it on refresh
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    pub token_type: Option<String>,
    pub scope: Option<String>,
}

/// HTTP client for the auth broker tier.
#[derive(Clone)]
pub struct AuthBrokerClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthBrokerClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Ask the broker for the provider authorization URL.
    pub async fn authorize_url(&self) -> Result<String, AppError> {
        #[derive(Deserialize)]
        struct AuthorizeResponse {
            auth_url: String,
        }

        let url = format!("{}/authorize", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 502,
                message: format!("Auth broker unreachable: {}", e),
            })?;

        if !response.status().is_success() {
            return Err(AppError::Upstream {
                status: response.status().as_u16(),
                message: "Failed to retrieve authorization URL".to_string(),
            });
        }

        let body: AuthorizeResponse = response.json().await.map_err(|e| AppError::Upstream {
            status: 502,
            message: format!("Invalid authorize response: {}", e),
        })?;
        Ok(body.auth_url)
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        self.token(json!({
            "grant_type": "authorization_code",
            "code": code,
        }))
        .await
    }

    /// Exchange a refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        self.token(json!({
            "grant_type": "refresh_token",
            "refresh_token": refresh_token,
        }))
        .await
    }

    async fn token(&self, payload: serde_json::Value) -> Result<TokenResponse, AppError> {
        let url = format!("{}/token", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 502,
                message: format!("Auth broker unreachable: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: "Failed to obtain access token from the auth broker".to_string(),
            });
        }

        response.json().await.map_err(|e| AppError::Upstream {
            status: 502,
            message: format!("Invalid token response: {}", e),
        })
    }

    /// Return a usable bearer token for this session, refreshing it
    /// first when missing or expired.
    ///
    /// A rejected refresh (broker 4xx, e.g. revoked refresh token)
    /// surfaces as an auth failure; a broker that cannot be reached
    /// stays an upstream error so callers can tell the two apart.
    /// The check-then-refresh is not guarded against concurrent
    /// requests in one session racing each other; a single browser
    /// issues these effectively serially.
    pub async fn ensure_valid_access_token(
        &self,
        session: &mut Session,
    ) -> Result<String, AppError> {
        if !session.needs_refresh(Utc::now()) {
            return Ok(session.access_token.clone());
        }

        let refresh_token = session
            .refresh_token
            .clone()
            .ok_or_else(|| AppError::Auth("No refresh token available".to_string()))?;

        tracing::info!("Access token missing or expired, refreshing");

        let token = match self.refresh(&refresh_token).await {
            Ok(token) => token,
            Err(AppError::Upstream { status, .. }) if (400..500).contains(&status) => {
                return Err(AppError::Auth(
                    "Failed to obtain or refresh access token".to_string(),
                ));
            }
            Err(e) => return Err(e),
        };

        session.apply(&token, Utc::now());
        tracing::info!("Token refresh successful");
        Ok(session.access_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn expired_session(refresh_token: Option<&str>) -> Session {
        let issued = Utc::now() - Duration::hours(2);
        let mut session = Session::new(
            &TokenResponse {
                access_token: "stale".to_string(),
                refresh_token: refresh_token.map(|s| s.to_string()),
                expires_in: 3600,
                token_type: None,
                scope: None,
            },
            issued,
        );
        session.user_id = "user-1".to_string();
        session
    }

    #[tokio::test]
    async fn refresh_without_refresh_token_fails_before_any_call() {
        // Base URL points nowhere; the call must fail on the missing
        // refresh token, not on the network.
        let client = AuthBrokerClient::new("http://127.0.0.1:9".to_string());
        let mut session = expired_session(None);

        let err = client
            .ensure_valid_access_token(&mut session)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
        // Session untouched
        assert_eq!(session.access_token, "stale");
    }

    #[tokio::test]
    async fn valid_token_is_returned_without_refresh() {
        let client = AuthBrokerClient::new("http://127.0.0.1:9".to_string());
        let mut session = Session::new(
            &TokenResponse {
                access_token: "fresh".to_string(),
                refresh_token: Some("r".to_string()),
                expires_in: 3600,
                token_type: None,
                scope: None,
            },
            Utc::now(),
        );

        let token = client.ensure_valid_access_token(&mut session).await.unwrap();
        assert_eq!(token, "fresh");
    }
}
