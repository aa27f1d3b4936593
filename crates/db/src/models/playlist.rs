//! Generated playlist model and DTOs.

use moodtunes_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::track::Track;

/// A row from `playlists`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Playlist {
    pub id: DbId,
    pub mood_entry_id: DbId,
    pub name: String,
    #[serde(skip_serializing)]
    pub prompt_used: String,
    /// Tracks that could not be catalog-verified at creation time.
    pub llm_fallback_count: i32,
    pub total_tracks_generated: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreatePlaylist {
    pub mood_entry_id: DbId,
    pub name: String,
    pub prompt_used: String,
    pub llm_fallback_count: i32,
}

/// A playlist with its tracks in position order.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistWithTracks {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub tracks: Vec<Track>,
}
