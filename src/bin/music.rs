// SPDX-License-Identifier: MIT

//! Wrapped music API proxy.
//!
//! Validates bearer tokens and forwards profile and top-items
//! requests to the provider's REST API.

use std::sync::Arc;

use wrapped::{config::ProxyConfig, services::ProviderApiClient, ProxyState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    wrapped::init_logging();

    let config = ProxyConfig::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting wrapped music proxy");

    let provider = ProviderApiClient::new(&config);

    let state = Arc::new(ProxyState { config: config.clone(), provider });

    let app = wrapped::routes::create_proxy_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
