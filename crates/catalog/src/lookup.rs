//! Two-pass catalog verification of LLM-suggested tracks.

use std::sync::Arc;

use moodtunes_core::duration::format_millis;
use serde::Serialize;

use crate::{CatalogTrack, TrackSearch};

/// Authoritative metadata for a track that was found in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedTrack {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    /// `M:SS`.
    pub duration: String,
    pub duration_ms: u64,
    pub uri: String,
}

impl From<CatalogTrack> for VerifiedTrack {
    fn from(track: CatalogTrack) -> Self {
        Self {
            title: track.name,
            artist: track.artists.join(", "),
            album: track.album,
            duration: format_millis(track.duration_ms),
            duration_ms: track.duration_ms,
            uri: track.uri,
        }
    }
}

/// Verifies `(title, artist)` pairs against the catalog.
///
/// Without a search backend (no credentials) every lookup is `None` and no
/// request is made. Search failures are logged and also yield `None`.
#[derive(Clone)]
pub struct CatalogLookup {
    search: Option<Arc<dyn TrackSearch>>,
}

impl CatalogLookup {
    pub fn new(search: Option<Arc<dyn TrackSearch>>) -> Self {
        Self { search }
    }

    pub fn disabled() -> Self {
        Self { search: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.search.is_some()
    }

    pub async fn lookup(
        &self,
        title: &str,
        artist: &str,
        market: Option<&str>,
    ) -> Option<VerifiedTrack> {
        let Some(search) = self.search.as_deref() else {
            tracing::error!(title, artist, "Catalog credentials not configured; skipping lookup");
            return None;
        };

        // Pass 1: exact title + artist.
        let exact = format!("track:{title} artist:{artist}");
        match search.search_tracks(&exact, 1, market).await {
            Ok(hits) => {
                if let Some(hit) = hits.into_iter().next() {
                    return Some(hit.into());
                }
            }
            Err(e) => {
                tracing::error!(error = %e, title, artist, market, "Catalog search failed");
                return None;
            }
        }

        // Pass 2: title only, accept the first hit credited to the artist.
        let loose = format!("track:{title}");
        let wanted = artist.trim().to_lowercase();
        match search.search_tracks(&loose, 5, market).await {
            Ok(hits) => {
                let found = hits.into_iter().find(|hit| {
                    hit.artists
                        .iter()
                        .any(|name| name.to_lowercase().contains(&wanted))
                });
                if found.is_none() {
                    tracing::debug!(title, artist, "No catalog match after loose search");
                }
                found.map(VerifiedTrack::from)
            }
            Err(e) => {
                tracing::error!(error = %e, title, artist, market, "Catalog loose search failed");
                None
            }
        }
    }
}
