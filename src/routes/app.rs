// SPDX-License-Identifier: MIT

//! Client-facing routes: login flow, profile, wraps and history.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Term, Wrap};
use crate::services::build_wrap;
use crate::session::{clear_session, Session};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/userhome", get(userhome))
        .route("/wrap", get(wrap))
        .route("/my-wraps", get(my_wraps).post(my_wraps))
        .route("/my-wraps/delete", get(my_wraps_delete).post(my_wraps_delete))
        .route("/logout", get(logout))
}

/// Landing page. Any lingering session is dropped here.
async fn index(jar: CookieJar) -> (CookieJar, Json<Value>) {
    (
        clear_session(jar),
        Json(json!({ "message": "Welcome to Wrapped. Log in at /login." })),
    )
}

/// Start the login flow: fetch the authorization URL from the broker
/// and send the browser there.
async fn login(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    let auth_url = state.broker.authorize_url().await.map_err(|e| {
        tracing::warn!(error = %e, "Could not retrieve authorization URL");
        AppError::Upstream {
            status: 502,
            message: "Failed to retrieve authorization URL from the auth broker".to_string(),
        }
    })?;

    tracing::info!("Redirecting to provider authorization");
    Ok(Redirect::temporary(&auth_url))
}

/// Query parameters for the OAuth callback.
#[derive(Deserialize)]
struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback: exchange the code, learn the user id, mint the
/// session cookie.
async fn callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "Authorization denied by provider");
        return Err(AppError::Auth(format!("Authorization failed: {}", error)));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::InvalidRequest("Authorization code not found".to_string()))?;

    let token = state.broker.exchange_code(&code).await?;
    let mut session = Session::new(&token, Utc::now());

    // The provider user id keys the wrap history
    let profile = state.music.profile(&session.access_token).await?;
    let user_id = profile
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Upstream {
            status: 502,
            message: "Profile response is missing a user id".to_string(),
        })?;
    session.user_id = user_id.to_string();

    tracing::info!(user_id = %session.user_id, "Login complete");

    let jar = session.store(jar, &state.config.session_signing_key)?;
    Ok((jar, Redirect::temporary("/userhome")))
}

/// Show the logged-in user's profile.
async fn userhome(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Response)> {
    let mut session = require_session(&jar, &state.config.session_signing_key)?;
    let token = state.broker.ensure_valid_access_token(&mut session).await?;
    let jar = session.store(jar, &state.config.session_signing_key)?;

    let profile = state.music.profile(&token).await?;
    Ok((jar, Json(profile).into_response()))
}

/// Query parameters for `GET /wrap`.
#[derive(Deserialize)]
struct WrapQuery {
    #[serde(default)]
    term: Option<String>,
}

/// Build a wrap for the requested term, persist it, return it.
async fn wrap(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<WrapQuery>,
) -> Result<(CookieJar, Json<Wrap>)> {
    let mut session = require_session(&jar, &state.config.session_signing_key)?;

    let term = query
        .term
        .as_deref()
        .and_then(Term::parse)
        .ok_or_else(|| {
            AppError::InvalidParameters("Valid term values: [short, medium, long]".to_string())
        })?;

    let token = state.broker.ensure_valid_access_token(&mut session).await?;
    let jar = session.store(jar, &state.config.session_signing_key)?;

    let wrap = build_wrap(&state.music, &token, term).await?;
    state.store.save(&session.user_id, &wrap).await?;

    tracing::info!(user_id = %session.user_id, term = term.label(), "Wrap saved");
    Ok((jar, Json(wrap)))
}

/// Query parameters carrying an optional list index.
#[derive(Deserialize)]
struct IndexQuery {
    #[serde(default)]
    index: Option<String>,
}

/// List all saved wraps, or fetch one by index.
async fn my_wraps(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<IndexQuery>,
) -> Result<Json<Value>> {
    let session = require_session(&jar, &state.config.session_signing_key)?;

    let body = match parse_index(query.index.as_deref())? {
        Some(index) => to_json(&state.store.get(&session.user_id, index).await?)?,
        None => to_json(&state.store.list(&session.user_id).await?)?,
    };
    Ok(Json(body))
}

/// Clear the history, or delete one wrap by index. Either way the
/// resulting list is returned.
async fn my_wraps_delete(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<IndexQuery>,
) -> Result<Json<Vec<Wrap>>> {
    let session = require_session(&jar, &state.config.session_signing_key)?;

    let remaining = match parse_index(query.index.as_deref())? {
        Some(index) => state.store.delete(&session.user_id, index).await?,
        None => state.store.clear(&session.user_id).await?,
    };
    Ok(Json(remaining))
}

/// Drop the session and go home.
async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (clear_session(jar), Redirect::temporary("/"))
}

fn require_session(jar: &CookieJar, signing_key: &[u8]) -> Result<Session> {
    Session::from_jar(jar, signing_key)
        .ok_or_else(|| AppError::Auth("Not logged in".to_string()))
}

fn parse_index(raw: Option<&str>) -> Result<Option<usize>> {
    raw.map(|value| {
        value
            .parse::<usize>()
            .map_err(|_| AppError::InvalidParameters(format!("Invalid index '{}'", value)))
    })
    .transpose()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Serialization failed: {}", e)))
}
