//! Repository for the `tracks` table.

use moodtunes_core::types::DbId;
use sqlx::PgPool;

use crate::models::track::{NewTrack, ReplaceTrack, Track};

pub(crate) const COLUMNS: &str = "id, playlist_id, title, artist, album, duration, catalog_uri, \
                                  position, created_at, updated_at";

pub struct TrackRepo;

impl TrackRepo {
    /// Tracks of one playlist in position order (ties broken by id).
    pub async fn list_for_playlist(
        pool: &PgPool,
        playlist_id: DbId,
    ) -> Result<Vec<Track>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tracks WHERE playlist_id = $1 ORDER BY position, id"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(playlist_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_for_playlists(
        pool: &PgPool,
        playlist_ids: &[DbId],
    ) -> Result<Vec<Track>, sqlx::Error> {
        if playlist_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM tracks
             WHERE playlist_id = ANY($1)
             ORDER BY playlist_id, position, id"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(playlist_ids)
            .fetch_all(pool)
            .await
    }

    /// Find a track only if it belongs to `playlist_id`.
    pub async fn find_in_playlist(
        pool: &PgPool,
        playlist_id: DbId,
        track_id: DbId,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1 AND playlist_id = $2");
        sqlx::query_as::<_, Track>(&query)
            .bind(track_id)
            .bind(playlist_id)
            .fetch_optional(pool)
            .await
    }

    /// Append a track after the current last position (0 for an empty playlist).
    pub async fn append(
        pool: &PgPool,
        playlist_id: DbId,
        input: &NewTrack,
    ) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (playlist_id, title, artist, album, duration, catalog_uri, position)
             SELECT $1, $2, $3, $4, $5, $6,
                    COALESCE((SELECT MAX(position) + 1 FROM tracks WHERE playlist_id = $1), 0)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(playlist_id)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(&input.album)
            .bind(&input.duration)
            .bind(&input.catalog_uri)
            .fetch_one(pool)
            .await
    }

    /// Overwrite title, artist and duration in place.
    ///
    /// Album and catalog URI are cleared since they described the old song.
    pub async fn replace_details(
        pool: &PgPool,
        track_id: DbId,
        input: &ReplaceTrack,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET
                title = $2,
                artist = $3,
                duration = $4,
                album = NULL,
                catalog_uri = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(track_id)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(&input.duration)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, track_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(track_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assign `position = index` for each id in `track_ids`, all or nothing.
    ///
    /// Returns `false` (and changes nothing) if any id does not belong to
    /// the playlist. Tracks not listed keep their current positions.
    pub async fn reorder(
        pool: &PgPool,
        playlist_id: DbId,
        track_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (position, track_id) in track_ids.iter().enumerate() {
            let result =
                sqlx::query("UPDATE tracks SET position = $3 WHERE id = $1 AND playlist_id = $2")
                    .bind(track_id)
                    .bind(playlist_id)
                    .bind(position as i32)
                    .execute(&mut *tx)
                    .await?;

            if result.rows_affected() == 0 {
                tracing::debug!(playlist_id, track_id, "Reorder rejected: foreign track id");
                tx.rollback().await?;
                return Ok(false);
            }
        }

        tx.commit().await?;
        Ok(true)
    }
}
