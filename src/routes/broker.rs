// SPDX-License-Identifier: MIT

//! Auth broker routes.
//!
//! Stateless: every call reconstructs what it needs from the request
//! payload. The broker is the only tier holding the OAuth client
//! credentials; it injects them server-side for both grant branches.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::BrokerState;

pub fn routes() -> Router<Arc<BrokerState>> {
    Router::new()
        .route("/authorize", get(authorize))
        .route("/token", post(token))
}

/// Response for `GET /authorize`.
#[derive(Serialize)]
pub struct AuthorizeResponse {
    pub auth_url: String,
}

/// Hand out the provider authorization URL.
async fn authorize(State(state): State<Arc<BrokerState>>) -> Json<AuthorizeResponse> {
    let auth_url = state.provider.authorize_url();
    tracing::debug!(auth_url = %auth_url, "Issued authorization URL");
    Json(AuthorizeResponse { auth_url })
}

/// Request body for `POST /token`.
#[derive(Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Exchange an authorization code or refresh token for tokens.
async fn token(
    State(state): State<Arc<BrokerState>>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<Value>> {
    let mut form: Vec<(&str, String)> = match request.grant_type.as_str() {
        "authorization_code" => {
            let code = request
                .code
                .ok_or_else(|| AppError::InvalidRequest("Missing authorization code".to_string()))?;
            vec![
                ("grant_type", "authorization_code".to_string()),
                ("code", code),
                ("redirect_uri", state.config.redirect_uri.clone()),
            ]
        }
        "refresh_token" => {
            let refresh_token = request
                .refresh_token
                .ok_or_else(|| AppError::InvalidRequest("Missing refresh token".to_string()))?;
            vec![
                ("grant_type", "refresh_token".to_string()),
                ("refresh_token", refresh_token),
            ]
        }
        other => {
            return Err(AppError::InvalidRequest(format!(
                "Invalid grant type '{}'",
                other
            )));
        }
    };

    // Client credentials are injected here and nowhere else
    form.push(("client_id", state.config.client_id.clone()));
    form.push(("client_secret", state.config.client_secret.clone()));

    let (status, body) = state.provider.request_token(&form).await?;
    if status != 200 {
        return Err(AppError::InvalidRequest(
            "Failed to obtain access token from the provider".to_string(),
        ));
    }

    Ok(Json(body))
}
