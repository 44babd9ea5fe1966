// SPDX-License-Identifier: MIT

//! Wrapped auth broker.
//!
//! Exchanges authorization codes and refresh tokens with the provider
//! and is the only tier that holds the OAuth client credentials.

use std::sync::Arc;

use wrapped::{config::BrokerConfig, services::ProviderAuthClient, BrokerState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    wrapped::init_logging();

    let config = BrokerConfig::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting wrapped auth broker");

    let provider = ProviderAuthClient::new(&config);

    let state = Arc::new(BrokerState { config: config.clone(), provider });

    let app = wrapped::routes::create_broker_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
