// SPDX-License-Identifier: MIT

use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;
use chrono::{Duration, Utc};

use wrapped::config::{AppConfig, BrokerConfig, ProxyConfig};
use wrapped::db::SummaryStore;
use wrapped::routes::{create_app_router, create_broker_router, create_proxy_router};
use wrapped::services::{
    AuthBrokerClient, MusicProxyClient, ProviderApiClient, ProviderAuthClient, TokenResponse,
};
use wrapped::session::{Session, SESSION_COOKIE};
use wrapped::{AppState, BrokerState, ProxyState};

/// Check if a MongoDB instance is available via environment variable.
#[allow(dead_code)]
pub fn mongo_available() -> bool {
    std::env::var("MONGODB_URI").is_ok()
}

/// Skip test with message if MongoDB is not available.
#[macro_export]
macro_rules! require_mongo {
    () => {
        if !crate::common::mongo_available() {
            eprintln!("⚠️  Skipping: MONGODB_URI not set");
            return;
        }
    };
}

/// Create a test app service with an offline mock store. Inter-service
/// URLs point at an unroutable port so an accidental outbound call
/// fails fast instead of hanging.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = AppConfig::default();
    let store = SummaryStore::new_mock();
    let broker = AuthBrokerClient::new("http://127.0.0.1:9".to_string());
    let music = MusicProxyClient::new("http://127.0.0.1:9".to_string());

    let state = Arc::new(AppState {
        config,
        store,
        broker,
        music,
    });

    (create_app_router(state.clone()), state)
}

/// Create a test auth broker.
#[allow(dead_code)]
pub fn create_test_broker() -> (axum::Router, Arc<BrokerState>) {
    let config = BrokerConfig::default();
    let provider = ProviderAuthClient::new(&config);
    let state = Arc::new(BrokerState { config, provider });
    (create_broker_router(state.clone()), state)
}

/// Create a test music proxy.
#[allow(dead_code)]
pub fn create_test_proxy() -> (axum::Router, Arc<ProxyState>) {
    let config = ProxyConfig::default();
    let provider = ProviderApiClient::new(&config);
    let state = Arc::new(ProxyState { config, provider });
    (create_proxy_router(state.clone()), state)
}

/// Build a session and return the `Cookie` header value carrying it.
///
/// `expires_in` may be negative to fabricate an expired access token.
#[allow(dead_code)]
pub fn session_cookie_header(
    state: &AppState,
    user_id: &str,
    expires_in: i64,
    refresh_token: Option<&str>,
) -> String {
    let now = if expires_in < 0 {
        Utc::now() - Duration::seconds(-expires_in + 3600)
    } else {
        Utc::now()
    };

    let mut session = Session::new(
        &TokenResponse {
            access_token: "test-access-token".to_string(),
            refresh_token: refresh_token.map(|s| s.to_string()),
            expires_in: if expires_in < 0 { 1 } else { expires_in },
            token_type: Some("Bearer".to_string()),
            scope: None,
        },
        now,
    );
    session.user_id = user_id.to_string();
    // Keep the cookie itself decodable even when the access token is stale
    session.exp = Utc::now().timestamp() + 3600;

    let jar = session
        .store(CookieJar::new(), &state.config.session_signing_key)
        .expect("session should sign");
    let cookie = jar.get(SESSION_COOKIE).expect("cookie should be present");

    format!("{}={}", SESSION_COOKIE, cookie.value())
}
