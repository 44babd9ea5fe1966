// SPDX-License-Identifier: MIT

//! Client for the music API proxy, used by the client-facing service.

use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::models::Term;

/// Top-items page as returned through the proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct TopItems<T> {
    pub items: Vec<T>,
}

/// A track from the provider's top-tracks endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TopTrack {
    pub name: String,
    pub duration_ms: u64,
    pub artists: Vec<ArtistRef>,
    pub album: AlbumRef,
}

/// Artist reference embedded in a track.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

/// Album reference embedded in a track.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub images: Vec<Image>,
}

/// An artist from the provider's top-artists endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TopArtist {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub popularity: u32,
}

/// Image descriptor; the provider orders these largest first.
#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

/// HTTP client for the music API proxy tier.
#[derive(Clone)]
pub struct MusicProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl MusicProxyClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch the user's profile through the proxy.
    ///
    /// The proxy passes the upstream status through, so a non-200 here
    /// becomes an upstream error carrying that status.
    pub async fn profile(&self, access_token: &str) -> Result<Value, AppError> {
        let url = format!("{}/user", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 502,
                message: format!("Music proxy unreachable: {}", e),
            })?;

        self.read_json(response, "Failed to fetch user profile from the music proxy")
            .await
    }

    /// Fetch the user's top tracks for a term.
    pub async fn top_tracks(
        &self,
        access_token: &str,
        term: Term,
    ) -> Result<Vec<TopTrack>, AppError> {
        let page: TopItems<TopTrack> = self.top(access_token, term, "tracks").await?;
        Ok(page.items)
    }

    /// Fetch the user's top artists for a term.
    pub async fn top_artists(
        &self,
        access_token: &str,
        term: Term,
    ) -> Result<Vec<TopArtist>, AppError> {
        let page: TopItems<TopArtist> = self.top(access_token, term, "artists").await?;
        Ok(page.items)
    }

    async fn top<T: for<'de> Deserialize<'de>>(
        &self,
        access_token: &str,
        term: Term,
        item_type: &str,
    ) -> Result<T, AppError> {
        let url = format!("{}/user/top", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("term", term.time_range()), ("type", item_type)])
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 502,
                message: format!("Music proxy unreachable: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!("Failed to fetch top {} from the music proxy", item_type),
            });
        }

        response.json().await.map_err(|e| AppError::Upstream {
            status: 502,
            message: format!("Invalid top items response: {}", e),
        })
    }

    async fn read_json(
        &self,
        response: reqwest::Response,
        error_message: &str,
    ) -> Result<Value, AppError> {
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: error_message.to_string(),
            });
        }

        response.json().await.map_err(|e| AppError::Upstream {
            status: 502,
            message: format!("Invalid proxy response: {}", e),
        })
    }
}
