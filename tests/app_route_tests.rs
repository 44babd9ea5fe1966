// SPDX-License-Identifier: MIT

//! Client-service route tests: session requirements, parameter
//! validation, and session-clearing redirects.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn protected_routes_require_a_session() {
    for uri in ["/userhome", "/wrap?term=short", "/my-wraps", "/my-wraps/delete"] {
        let (app, _state) = common::create_test_app();

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "uri: {}", uri);
    }
}

#[tokio::test]
async fn garbage_session_cookie_is_unauthorized() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/my-wraps")
                .header(header::COOKIE, "wrapped_session=not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrap_rejects_invalid_term() {
    let (app, state) = common::create_test_app();
    let cookie = common::session_cookie_header(&state, "user-1", 3600, Some("refresh"));

    for uri in ["/wrap", "/wrap?term=yearly", "/wrap?term=short_term"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
    }
}

#[tokio::test]
async fn expired_session_without_refresh_token_is_unauthorized() {
    let (app, state) = common::create_test_app();
    let cookie = common::session_cookie_header(&state, "user-1", -1, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/userhome")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn my_wraps_rejects_non_numeric_index() {
    let (app, state) = common::create_test_app();
    let cookie = common::session_cookie_header(&state, "user-1", 3600, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/my-wraps?index=two")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn my_wraps_with_offline_store_is_a_database_error() {
    let (app, state) = common::create_test_app();
    let cookie = common::session_cookie_header(&state, "user-1", 3600, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/my-wraps")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn callback_without_code_is_a_bad_request() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/callback")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn callback_with_provider_error_is_unauthorized() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/callback?error=access_denied")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn index_clears_the_session_cookie() {
    let (app, state) = common::create_test_app();
    let cookie = common::session_cookie_header(&state, "user-1", 3600, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|h| h.to_str().ok())
        .expect("session removal cookie expected");
    assert!(set_cookie.starts_with("wrapped_session="));
}

#[tokio::test]
async fn logout_redirects_home_and_clears_the_session() {
    let (app, state) = common::create_test_app();
    let cookie = common::session_cookie_header(&state, "user-1", 3600, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|h| h.to_str().ok()),
        Some("/")
    );
    assert!(response.headers().get(header::SET_COOKIE).is_some());
}

#[tokio::test]
async fn health_is_public() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
