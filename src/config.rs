// SPDX-License-Identifier: MIT

//! Per-tier configuration loaded from environment variables.
//!
//! Each binary loads only the config struct for its tier. `.env` files
//! are honored for local development via dotenvy.

use std::env;

/// Configuration for the client-facing service (`wrapped-app`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server port
    pub port: u16,
    /// Base URL of the auth broker
    pub auth_service_url: String,
    /// Base URL of the music API proxy
    pub music_service_url: String,
    /// MongoDB connection string
    pub mongo_uri: String,
    /// MongoDB database name
    pub mongo_db: String,
    /// HS256 key for the session cookie (raw bytes)
    pub session_signing_key: Vec<u8>,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: read_port(5000),
            auth_service_url: env::var("AUTH_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            music_service_url: env::var("MUSIC_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            mongo_uri: env::var("MONGODB_URI").map_err(|_| ConfigError::Missing("MONGODB_URI"))?,
            mongo_db: env::var("MONGODB_DATABASE").unwrap_or_else(|_| "wrapped".to_string()),
            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
        })
    }
}

impl Default for AppConfig {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 5000,
            auth_service_url: "http://localhost:8000".to_string(),
            music_service_url: "http://localhost:8080".to_string(),
            mongo_uri: "mongodb://localhost:27017".to_string(),
            mongo_db: "wrapped_test".to_string(),
            session_signing_key: b"test_session_key_32_bytes_min!!".to_vec(),
            frontend_url: "http://localhost:5000".to_string(),
        }
    }
}

/// Configuration for the auth broker (`wrapped-auth`).
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Server port
    pub port: u16,
    /// OAuth client ID (public)
    pub client_id: String,
    /// OAuth client secret (never reaches the browser)
    pub client_secret: String,
    /// Redirect URI registered with the provider (the app's /callback)
    pub redirect_uri: String,
    /// Provider authorization endpoint
    pub auth_url: String,
    /// Provider token endpoint
    pub token_url: String,
}

impl BrokerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: read_port(8000),
            client_id: env::var("SPOTIFY_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("SPOTIFY_CLIENT_ID"))?,
            client_secret: env::var("SPOTIFY_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SPOTIFY_CLIENT_SECRET"))?,
            redirect_uri: env::var("OAUTH_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:5000/callback".to_string()),
            auth_url: env::var("PROVIDER_AUTH_URL")
                .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string()),
            token_url: env::var("PROVIDER_TOKEN_URL")
                .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string()),
        })
    }
}

impl Default for BrokerConfig {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8000,
            client_id: "test_client_id".to_string(),
            client_secret: "test_client_secret".to_string(),
            redirect_uri: "http://localhost:5000/callback".to_string(),
            auth_url: "https://accounts.spotify.com/authorize".to_string(),
            token_url: "https://accounts.spotify.com/api/token".to_string(),
        }
    }
}

/// Configuration for the music API proxy (`wrapped-music`).
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Server port
    pub port: u16,
    /// Provider REST API base URL
    pub api_base_url: String,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: read_port(8080),
            api_base_url: env::var("PROVIDER_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.spotify.com/v1".to_string()),
        })
    }
}

impl Default for ProxyConfig {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            api_base_url: "https://api.spotify.com/v1".to_string(),
        }
    }
}

fn read_port(default: u16) -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broker_config_from_env() {
        env::set_var("SPOTIFY_CLIENT_ID", "test_id");
        env::set_var("SPOTIFY_CLIENT_SECRET", "test_secret ");

        let config = BrokerConfig::from_env().expect("Config should load");

        assert_eq!(config.client_id, "test_id");
        // Secret is trimmed
        assert_eq!(config.client_secret, "test_secret");
        assert!(config.redirect_uri.ends_with("/callback"));
    }

    #[test]
    fn proxy_config_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.api_base_url, "https://api.spotify.com/v1");
        assert_eq!(config.port, 8080);
    }
}
