//! Playlist track model and DTOs.

use moodtunes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `tracks`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    pub id: DbId,
    pub playlist_id: DbId,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    /// `M:SS` when known.
    pub duration: Option<String>,
    pub catalog_uri: Option<String>,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Track content without placement; the repository assigns `position`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewTrack {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration: Option<String>,
    pub catalog_uri: Option<String>,
}

/// In-place rewrite used by the replacement flow.
#[derive(Debug, Clone)]
pub struct ReplaceTrack {
    pub title: String,
    pub artist: String,
    pub duration: Option<String>,
}
