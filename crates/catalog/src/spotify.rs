//! Spotify Web API search using the client-credentials flow.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::{CatalogError, CatalogTrack, TrackSearch};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Tokens are refreshed this long before Spotify says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl SpotifyConfig {
    /// Load credentials from the environment.
    ///
    /// | Env Var                 | Default |
    /// |-------------------------|---------|
    /// | `SPOTIFY_CLIENT_ID`     | unset   |
    /// | `SPOTIFY_CLIENT_SECRET` | unset   |
    ///
    /// Returns `None` unless both are set; catalog lookup is then disabled.
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("SPOTIFY_CLIENT_ID").ok()?;
        let client_secret = std::env::var("SPOTIFY_CLIENT_SECRET").ok()?;
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            return None;
        }
        Some(Self {
            client_id,
            client_secret,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct Paging {
    #[serde(default)]
    items: Vec<TrackObject>,
}

#[derive(Debug, Deserialize)]
struct TrackObject {
    name: String,
    #[serde(default)]
    artists: Vec<NamedObject>,
    album: Option<NamedObject>,
    duration_ms: u64,
    uri: String,
}

#[derive(Debug, Deserialize)]
struct NamedObject {
    name: String,
}

impl From<TrackObject> for CatalogTrack {
    fn from(track: TrackObject) -> Self {
        Self {
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            album: track.album.map(|a| a.name),
            duration_ms: track.duration_ms,
            uri: track.uri,
        }
    }
}

/// Spotify search client. The access token is cached and shared.
pub struct SpotifyClient {
    client: reqwest::Client,
    config: SpotifyConfig,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: SpotifyConfig) -> Self {
        Self {
            client,
            config,
            token: Mutex::new(None),
        }
    }

    /// Return a valid access token, fetching a new one when the cached one
    /// is missing or about to expire.
    async fn access_token(&self) -> Result<String, CatalogError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        tracing::debug!("Fetching Spotify access token");
        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let response = Self::ensure_success(response).await.map_err(|e| {
            *cached = None;
            CatalogError::Auth(e.to_string())
        })?;
        let token: TokenResponse = response.json().await?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    // ---- private helpers ----

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl TrackSearch for SpotifyClient {
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        market: Option<&str>,
    ) -> Result<Vec<CatalogTrack>, CatalogError> {
        let token = self.access_token().await?;

        let limit = limit.to_string();
        let mut params = vec![("q", query), ("type", "track"), ("limit", limit.as_str())];
        if let Some(market) = market {
            params.push(("market", market));
        }

        let response = self
            .client
            .get(format!("{API_BASE_URL}/search"))
            .bearer_auth(token)
            .query(&params)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body: SearchResponse = response.json().await?;
        Ok(body
            .tracks
            .map(|page| page.items.into_iter().map(CatalogTrack::from).collect())
            .unwrap_or_default())
    }
}
