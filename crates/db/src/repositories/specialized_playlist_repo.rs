//! Repository for the `specialized_playlists` table.

use chrono::NaiveDate;
use moodtunes_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::specialized_playlist::{
    CachedTrack, CreateSpecializedPlaylist, SpecializedPlaylist,
};

const COLUMNS: &str = "id, name, description, keywords, target_song_count, cached_tracks, \
                        last_refreshed_date, created_at, updated_at";

pub struct SpecializedPlaylistRepo;

impl SpecializedPlaylistRepo {
    /// Fetch a template by unique name, inserting it if missing.
    ///
    /// The flag is `true` when this call created the row. Existing rows are
    /// returned untouched.
    pub async fn get_or_create(
        pool: &PgPool,
        input: &CreateSpecializedPlaylist,
    ) -> Result<(SpecializedPlaylist, bool), sqlx::Error> {
        let insert = format!(
            "INSERT INTO specialized_playlists (name, description, keywords, target_song_count)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_specialized_playlists_name DO NOTHING
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, SpecializedPlaylist>(&insert)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.keywords)
            .bind(input.target_song_count)
            .fetch_optional(pool)
            .await?;

        if let Some(row) = created {
            return Ok((row, true));
        }

        let select = format!("SELECT {COLUMNS} FROM specialized_playlists WHERE name = $1");
        let existing = sqlx::query_as::<_, SpecializedPlaylist>(&select)
            .bind(&input.name)
            .fetch_one(pool)
            .await?;
        Ok((existing, false))
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<SpecializedPlaylist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM specialized_playlists ORDER BY id");
        sqlx::query_as::<_, SpecializedPlaylist>(&query)
            .fetch_all(pool)
            .await
    }

    /// Replace the cached track list and stamp the refresh date.
    pub async fn update_cache(
        pool: &PgPool,
        id: DbId,
        tracks: &[CachedTrack],
        refreshed_on: NaiveDate,
    ) -> Result<Option<SpecializedPlaylist>, sqlx::Error> {
        let query = format!(
            "UPDATE specialized_playlists SET
                cached_tracks = $2,
                last_refreshed_date = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpecializedPlaylist>(&query)
            .bind(id)
            .bind(Json(tracks))
            .bind(refreshed_on)
            .fetch_optional(pool)
            .await
    }
}
