// SPDX-License-Identifier: MIT

//! HTTP route handlers, one module per tier.

pub mod app;
pub mod broker;
pub mod proxy;

use axum::http::{header, Method};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{AppState, BrokerState, ProxyState};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

fn health(service: &'static str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: service.to_string(),
    })
}

fn trace_layer() -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

/// Build the client-facing service router.
pub fn create_app_router(state: Arc<AppState>) -> Router {
    // Allow the frontend origin and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    app::routes()
        .route("/health", get(|| async { health("app") }))
        .layer(cors)
        .layer(trace_layer())
        .with_state(state)
}

/// Build the auth broker router.
pub fn create_broker_router(state: Arc<BrokerState>) -> Router {
    broker::routes()
        .route("/health", get(|| async { health("auth") }))
        .layer(trace_layer())
        .with_state(state)
}

/// Build the music API proxy router.
pub fn create_proxy_router(state: Arc<ProxyState>) -> Router {
    proxy::routes()
        .route("/health", get(|| async { health("music") }))
        .layer(trace_layer())
        .with_state(state)
}
