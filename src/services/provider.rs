// SPDX-License-Identifier: MIT

//! Upstream provider clients used by the broker and proxy tiers.
//!
//! Two thin reqwest wrappers: `ProviderAuthClient` talks to the OAuth
//! endpoints (authorization URL, token exchange), `ProviderApiClient`
//! talks to the REST API (`/me`, `/me/top/{type}`). Both pass the
//! upstream status through and substitute a generic error body on
//! non-200, so callers never see raw provider error payloads.

use serde_json::{json, Value};

use crate::config::{BrokerConfig, ProxyConfig};
use crate::error::AppError;

/// OAuth scopes requested on login.
pub const OAUTH_SCOPE: &str = "user-library-read user-top-read user-read-recently-played user-read-private user-read-email";

/// Page size forwarded on every top-items request.
pub const TOP_ITEMS_LIMIT: u32 = 10;

/// Query pairs for a top-items request: fixed limit plus the mapped
/// time range, nothing else.
pub fn top_items_query(time_range: &str) -> [(&'static str, String); 2] {
    [
        ("time_range", time_range.to_string()),
        ("limit", TOP_ITEMS_LIMIT.to_string()),
    ]
}

/// Client for the provider's OAuth endpoints. Holds the client
/// credentials so they never reach the browser.
#[derive(Clone)]
pub struct ProviderAuthClient {
    http: reqwest::Client,
    auth_url: String,
    token_url: String,
    client_id: String,
    redirect_uri: String,
}

impl ProviderAuthClient {
    pub fn new(config: &BrokerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// Build the authorization redirect URL. No upstream call is made.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}?response_type=code&client_id={}&scope={}&redirect_uri={}",
            self.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(OAUTH_SCOPE),
            urlencoding::encode(&self.redirect_uri),
        )
    }

    /// POST a grant to the provider's token endpoint.
    ///
    /// Returns the upstream status and, on 200, the token response
    /// body verbatim.
    pub async fn request_token(&self, form: &[(&str, String)]) -> Result<(u16, Value), AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 502,
                message: format!("Token request failed: {}", e),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, body = %body, "Provider token endpoint returned an error");
            return Ok((status, Value::Null));
        }

        let body = response.json().await.map_err(|e| AppError::Upstream {
            status: 502,
            message: format!("Invalid token response: {}", e),
        })?;
        Ok((200, body))
    }
}

/// Client for the provider's REST API, used by the proxy tier.
#[derive(Clone)]
pub struct ProviderApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProviderApiClient {
    pub fn new(config: &ProxyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
        }
    }

    /// Fetch the authenticated user's profile.
    pub async fn profile(&self, access_token: &str) -> Result<(u16, Value), AppError> {
        let url = format!("{}/me", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 502,
                message: format!("Profile request failed: {}", e),
            })?;

        self.passthrough(response).await
    }

    /// Fetch the user's top tracks or artists for a time range.
    pub async fn top_items(
        &self,
        access_token: &str,
        item_type: &str,
        time_range: &str,
    ) -> Result<(u16, Value), AppError> {
        let url = format!("{}/me/top/{}", self.base_url, item_type);
        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&top_items_query(time_range))
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 502,
                message: format!("Top items request failed: {}", e),
            })?;

        self.passthrough(response).await
    }

    /// 200 passes the body through verbatim; anything else keeps the
    /// upstream status with a generic error body.
    async fn passthrough(&self, response: reqwest::Response) -> Result<(u16, Value), AppError> {
        let status = response.status().as_u16();
        if status != 200 {
            tracing::warn!(status, "Provider API returned an error");
            return Ok((status, json!({ "error": "Failed to fetch user data from the music provider." })));
        }

        let body = response.json().await.map_err(|e| AppError::Upstream {
            status: 502,
            message: format!("Invalid provider response: {}", e),
        })?;
        Ok((200, body))
    }
}
