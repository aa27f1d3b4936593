//! Repository for the `mood_entries` table.

use std::collections::HashMap;

use moodtunes_core::types::DbId;
use sqlx::PgPool;

use crate::models::mood_entry::{CreateMoodEntry, MoodEntry, MoodEntryWithPlaylists};
use crate::models::playlist::PlaylistWithTracks;
use crate::repositories::PlaylistRepo;

const COLUMNS: &str = "id, user_id, mood_text, energy_level, season, category, recorded_at, \
                        created_at, updated_at";

pub struct MoodEntryRepo;

impl MoodEntryRepo {
    pub async fn create(pool: &PgPool, input: &CreateMoodEntry) -> Result<MoodEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO mood_entries (user_id, mood_text, energy_level, season, category)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MoodEntry>(&query)
            .bind(input.user_id)
            .bind(&input.mood_text)
            .bind(input.energy_level)
            .bind(&input.season)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MoodEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mood_entries WHERE id = $1");
        sqlx::query_as::<_, MoodEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an entry. Cascades to its playlists and their tracks.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mood_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All of a user's entries, newest first, each with its playlists.
    pub async fn list_for_user_with_playlists(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<MoodEntryWithPlaylists>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mood_entries
             WHERE user_id = $1
             ORDER BY recorded_at DESC, id DESC"
        );
        let entries = sqlx::query_as::<_, MoodEntry>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let entry_ids: Vec<DbId> = entries.iter().map(|e| e.id).collect();
        let mut by_entry: HashMap<DbId, Vec<PlaylistWithTracks>> = HashMap::new();
        for playlist in PlaylistRepo::list_for_mood_entries(pool, &entry_ids).await? {
            by_entry
                .entry(playlist.playlist.mood_entry_id)
                .or_default()
                .push(playlist);
        }

        Ok(entries
            .into_iter()
            .map(|entry| {
                let playlists = by_entry.remove(&entry.id).unwrap_or_default();
                MoodEntryWithPlaylists { entry, playlists }
            })
            .collect())
    }
}
