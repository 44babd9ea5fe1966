// SPDX-License-Identifier: MIT

//! Music API proxy routes.
//!
//! Validates the inbound bearer token and query parameters, then
//! forwards to the provider. Invalid input is rejected before any
//! upstream call is made.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::ProxyState;

pub fn routes() -> Router<Arc<ProxyState>> {
    Router::new()
        .route("/user", get(user))
        .route("/user/top", get(top))
}

/// Forward the user profile request.
async fn user(State(state): State<Arc<ProxyState>>, headers: HeaderMap) -> Result<Response> {
    let token = bearer_token(&headers)?;
    let (status, body) = state.provider.profile(&token).await?;
    Ok(passthrough(status, body))
}

/// Query parameters for `GET /user/top`.
#[derive(Deserialize)]
struct TopParams {
    #[serde(default)]
    term: Option<String>,
    #[serde(default, rename = "type")]
    item_type: Option<String>,
}

/// Forward a top-items request with the fixed page size.
async fn top(
    State(state): State<Arc<ProxyState>>,
    headers: HeaderMap,
    Query(params): Query<TopParams>,
) -> Result<Response> {
    let token = bearer_token(&headers)?;
    let (time_range, item_type) =
        validate_top_params(params.term.as_deref(), params.item_type.as_deref())?;

    let (status, body) = state.provider.top_items(&token, item_type, time_range).await?;
    Ok(passthrough(status, body))
}

fn passthrough(status: u16, body: Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(body)).into_response()
}

/// Pull the bearer token out of the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<String> {
    let missing = || AppError::InvalidRequest("No access token found".to_string());

    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(missing)?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(missing()),
    }
}

/// Check the term/type combination; nothing is forwarded on failure.
pub fn validate_top_params(
    term: Option<&str>,
    item_type: Option<&str>,
) -> Result<(&'static str, &'static str)> {
    let invalid = || {
        AppError::InvalidParameters(
            "Valid term values: [short_term, medium_term, long_term]. \
             Valid type values: [tracks, artists]"
                .to_string(),
        )
    };

    let time_range = match term {
        Some("short_term") => "short_term",
        Some("medium_term") => "medium_term",
        Some("long_term") => "long_term",
        _ => return Err(invalid()),
    };

    let item_type = match item_type {
        Some("tracks") => "tracks",
        Some("artists") => "artists",
        _ => return Err(invalid()),
    };

    Ok((time_range, item_type))
}
