//! Music-catalog search and market resolution.
//!
//! - [`TrackSearch`] is the raw search seam; [`spotify::SpotifyClient`]
//!   implements it against the Spotify Web API.
//! - [`lookup::CatalogLookup`] runs the two-pass verification search and
//!   never surfaces errors.
//! - [`market::MarketResolver`] picks the market code used to bias search.

pub mod lookup;
pub mod market;
pub mod spotify;

use async_trait::async_trait;

pub use lookup::{CatalogLookup, VerifiedTrack};
pub use market::MarketResolver;
pub use spotify::{SpotifyClient, SpotifyConfig};

/// Errors from the catalog HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Catalog API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Catalog authentication failed: {0}")]
    Auth(String),
}

/// One search hit as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTrack {
    pub name: String,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub duration_ms: u64,
    pub uri: String,
}

/// Free-text track search against a music catalog.
#[async_trait]
pub trait TrackSearch: Send + Sync {
    /// Search tracks with a catalog query string (`track:... artist:...`).
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        market: Option<&str>,
    ) -> Result<Vec<CatalogTrack>, CatalogError>;
}
