// SPDX-License-Identifier: MIT

//! Wrapped client-facing service.
//!
//! Owns the browser session, talks to the auth broker and the music
//! API proxy, and stores wrap history in MongoDB.

use std::sync::Arc;

use wrapped::{
    config::AppConfig,
    db::SummaryStore,
    services::{AuthBrokerClient, MusicProxyClient},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    wrapped::init_logging();

    let config = AppConfig::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting wrapped app service");

    let store = SummaryStore::connect(&config.mongo_uri, &config.mongo_db)
        .await
        .expect("Failed to connect to MongoDB");

    let broker = AuthBrokerClient::new(config.auth_service_url.clone());
    let music = MusicProxyClient::new(config.music_service_url.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        broker,
        music,
    });

    let app = wrapped::routes::create_app_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
