// SPDX-License-Identifier: MIT

//! Wrapped: a three-tier relay that builds "wrap" summaries from a
//! music-streaming provider.
//!
//! The crate ships three binaries sharing this library:
//! - `wrapped-app`: client-facing service (session, wraps, history)
//! - `wrapped-auth`: auth broker (OAuth code/refresh token exchange)
//! - `wrapped-music`: thin proxy in front of the provider's REST API

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;

use config::{AppConfig, BrokerConfig, ProxyConfig};
use db::SummaryStore;
use services::{AuthBrokerClient, MusicProxyClient, ProviderApiClient, ProviderAuthClient};

/// Shared state for the client-facing service.
pub struct AppState {
    pub config: AppConfig,
    pub store: SummaryStore,
    pub broker: AuthBrokerClient,
    pub music: MusicProxyClient,
}

/// Shared state for the auth broker.
pub struct BrokerState {
    pub config: BrokerConfig,
    pub provider: ProviderAuthClient,
}

/// Shared state for the music API proxy.
pub struct ProxyState {
    pub config: ProxyConfig,
    pub provider: ProviderApiClient,
}

/// Initialize structured JSON logging.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wrapped=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
