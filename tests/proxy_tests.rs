// SPDX-License-Identifier: MIT

//! Music proxy tests: bearer-token and parameter validation.
//!
//! Every rejection here happens before the proxy would contact the
//! provider, so these run without any network access.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn user_requires_a_bearer_token() {
    let (app, _state) = common::create_test_proxy();

    let response = app
        .oneshot(Request::builder().uri("/user").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn top_requires_a_bearer_token() {
    let (app, _state) = common::create_test_proxy();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/user/top?term=short_term&type=tracks")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn top_rejects_invalid_parameter_combinations() {
    let invalid = [
        "/user/top",
        "/user/top?term=short_term",
        "/user/top?type=tracks",
        "/user/top?term=short&type=tracks",
        "/user/top?term=short_term&type=albums",
        "/user/top?term=yearly&type=artists",
    ];

    for uri in invalid {
        let (app, _state) = common::create_test_proxy();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::AUTHORIZATION, "Bearer test-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
    }
}

#[tokio::test]
async fn malformed_authorization_header_is_rejected() {
    let (app, _state) = common::create_test_proxy();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/user")
                .header(header::AUTHORIZATION, "token-without-scheme")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_is_public() {
    let (app, _state) = common::create_test_proxy();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
