//! Mood entry model and DTOs.

use moodtunes_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::playlist::PlaylistWithTracks;

/// A row from `mood_entries`.
///
/// `season` and `category` hold the display labels of
/// [`moodtunes_core::mood::Season`] and [`moodtunes_core::mood::MoodCategory`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MoodEntry {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub mood_text: String,
    pub energy_level: i32,
    pub season: String,
    pub category: String,
    pub recorded_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateMoodEntry {
    pub user_id: DbId,
    pub mood_text: String,
    pub energy_level: i32,
    pub season: String,
    pub category: String,
}

/// A mood entry together with every playlist generated from it.
#[derive(Debug, Clone, Serialize)]
pub struct MoodEntryWithPlaylists {
    #[serde(flatten)]
    pub entry: MoodEntry,
    pub playlists: Vec<PlaylistWithTracks>,
}
