//! Specialized (template) playlist model.

use chrono::NaiveDate;
use moodtunes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

/// One generated track as cached on a specialized playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedTrack {
    /// Index within the generated list.
    pub id: i32,
    pub title: String,
    pub artist: String,
    /// `None` when the model sent an explicit `null`.
    pub duration: Option<String>,
    pub spotify_track_id: Option<String>,
}

/// A row from `specialized_playlists`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SpecializedPlaylist {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub keywords: String,
    pub target_song_count: i32,
    pub cached_tracks: Option<Json<Vec<CachedTrack>>>,
    pub last_refreshed_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SpecializedPlaylist {
    pub fn has_cached_tracks(&self) -> bool {
        self.cached_tracks
            .as_ref()
            .is_some_and(|tracks| !tracks.0.is_empty())
    }

    /// New, empty or last refreshed before `today`.
    pub fn needs_refresh(&self, today: NaiveDate) -> bool {
        !self.has_cached_tracks() || self.last_refreshed_date.is_none_or(|d| d < today)
    }
}

#[derive(Debug, Clone)]
pub struct CreateSpecializedPlaylist {
    pub name: String,
    pub description: String,
    pub keywords: String,
    pub target_song_count: i32,
}
