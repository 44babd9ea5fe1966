// SPDX-License-Identifier: MIT

//! Request-scoped session state carried in a signed cookie.
//!
//! The session holds the OAuth access token, the refresh token, the
//! token expiry, and the provider user id for one browser session. It
//! is serialized into an HS256 JWT and stored in a cookie; handlers
//! decode it per request, mutate their own copy, and re-mint the
//! cookie when a token refresh changed it. Nothing is shared across
//! requests.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::TokenResponse;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "wrapped_session";

/// How long a minted session cookie stays decodable (7 days).
const COOKIE_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// One logged-in user's token state, decoded from the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for the provider API
    pub access_token: String,
    /// Refresh token, if the provider issued one
    pub refresh_token: Option<String>,
    /// Access token expiry (Unix seconds, UTC)
    pub expires_at: i64,
    /// Provider user id (key for stored wraps)
    pub user_id: String,
    /// Cookie expiry claim (Unix seconds)
    pub exp: i64,
}

impl Session {
    /// Build a fresh session from a token endpoint response.
    pub fn new(token: &TokenResponse, now: DateTime<Utc>) -> Self {
        let mut session = Session {
            access_token: String::new(),
            refresh_token: None,
            expires_at: 0,
            user_id: String::new(),
            exp: now.timestamp() + COOKIE_TTL_SECS,
        };
        session.apply(token, now);
        session
    }

    /// Overwrite token fields from a token endpoint response.
    ///
    /// The provider may omit the refresh token on a refresh grant; the
    /// previously stored one stays valid in that case.
    pub fn apply(&mut self, token: &TokenResponse, now: DateTime<Utc>) {
        self.access_token = token.access_token.clone();
        if let Some(refresh) = &token.refresh_token {
            self.refresh_token = Some(refresh.clone());
        }
        self.expires_at = now.timestamp() + token.expires_in;
    }

    /// Whether the access token is missing or past its expiry.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.access_token.is_empty() || self.expires_at == 0 || now.timestamp() >= self.expires_at
    }

    /// Decode a session from the cookie jar, if a valid cookie exists.
    pub fn from_jar(jar: &CookieJar, signing_key: &[u8]) -> Option<Self> {
        let cookie = jar.get(SESSION_COOKIE)?;

        let key = DecodingKey::from_secret(signing_key);
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Session>(cookie.value(), &key, &validation) {
            Ok(data) => Some(data.claims),
            Err(err) => {
                tracing::debug!(error = %err, "Rejected session cookie");
                None
            }
        }
    }

    /// Sign the session and put it into the jar, replacing any
    /// previous session cookie.
    pub fn store(&self, jar: CookieJar, signing_key: &[u8]) -> Result<CookieJar, AppError> {
        let token = encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(signing_key),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Session signing failed: {}", e)))?;

        let cookie = Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();

        Ok(jar.add(cookie))
    }
}

/// Remove the session cookie (logout, or landing on `/`).
pub fn clear_session(jar: CookieJar) -> CookieJar {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    jar.remove(cookie)
}
