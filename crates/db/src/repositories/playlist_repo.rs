//! Repository for the `playlists` table.

use std::collections::HashMap;

use moodtunes_core::types::DbId;
use sqlx::PgPool;

use crate::models::playlist::{CreatePlaylist, Playlist, PlaylistWithTracks};
use crate::models::track::{NewTrack, Track};
use crate::repositories::track_repo;

const COLUMNS: &str = "id, mood_entry_id, name, prompt_used, llm_fallback_count, \
                        total_tracks_generated, created_at, updated_at";

/// Same columns qualified for queries joining `mood_entries`.
const QUALIFIED_COLUMNS: &str = "p.id, p.mood_entry_id, p.name, p.prompt_used, \
                                  p.llm_fallback_count, p.total_tracks_generated, \
                                  p.created_at, p.updated_at";

pub struct PlaylistRepo;

impl PlaylistRepo {
    /// Insert a playlist and its tracks in one transaction.
    ///
    /// `total_tracks_generated` is the number of tracks inserted and each
    /// track's position is its index in `tracks`.
    pub async fn create_with_tracks(
        pool: &PgPool,
        input: &CreatePlaylist,
        tracks: &[NewTrack],
    ) -> Result<PlaylistWithTracks, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO playlists (mood_entry_id, name, prompt_used, llm_fallback_count, total_tracks_generated)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let playlist = sqlx::query_as::<_, Playlist>(&insert_query)
            .bind(input.mood_entry_id)
            .bind(&input.name)
            .bind(&input.prompt_used)
            .bind(input.llm_fallback_count)
            .bind(tracks.len() as i32)
            .fetch_one(&mut *tx)
            .await?;

        let track_query = format!(
            "INSERT INTO tracks (playlist_id, title, artist, album, duration, catalog_uri, position)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            track_repo::COLUMNS
        );
        let mut created = Vec::with_capacity(tracks.len());
        for (position, track) in tracks.iter().enumerate() {
            let row = sqlx::query_as::<_, Track>(&track_query)
                .bind(playlist.id)
                .bind(&track.title)
                .bind(&track.artist)
                .bind(&track.album)
                .bind(&track.duration)
                .bind(&track.catalog_uri)
                .bind(position as i32)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(PlaylistWithTracks {
            playlist,
            tracks: created,
        })
    }

    /// Find a playlist only if it belongs to `user_id` (via its mood entry).
    pub async fn find_owned(
        pool: &PgPool,
        playlist_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Playlist>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} FROM playlists p
             JOIN mood_entries m ON m.id = p.mood_entry_id
             WHERE p.id = $1 AND m.user_id = $2"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(playlist_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_owned_with_tracks(
        pool: &PgPool,
        playlist_id: DbId,
        user_id: DbId,
    ) -> Result<Option<PlaylistWithTracks>, sqlx::Error> {
        match Self::find_owned(pool, playlist_id, user_id).await? {
            Some(playlist) => {
                let tracks = track_repo::TrackRepo::list_for_playlist(pool, playlist.id).await?;
                Ok(Some(PlaylistWithTracks { playlist, tracks }))
            }
            None => Ok(None),
        }
    }

    /// Every playlist a user owns, newest first, with ordered tracks.
    pub async fn list_for_user_with_tracks(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PlaylistWithTracks>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} FROM playlists p
             JOIN mood_entries m ON m.id = p.mood_entry_id
             WHERE m.user_id = $1
             ORDER BY p.created_at DESC, p.id DESC"
        );
        let playlists = sqlx::query_as::<_, Playlist>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Self::attach_tracks(pool, playlists).await
    }

    /// Playlists generated from any of the given mood entries, oldest first.
    pub async fn list_for_mood_entries(
        pool: &PgPool,
        mood_entry_ids: &[DbId],
    ) -> Result<Vec<PlaylistWithTracks>, sqlx::Error> {
        if mood_entry_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM playlists
             WHERE mood_entry_id = ANY($1)
             ORDER BY created_at, id"
        );
        let playlists = sqlx::query_as::<_, Playlist>(&query)
            .bind(mood_entry_ids)
            .fetch_all(pool)
            .await?;
        Self::attach_tracks(pool, playlists).await
    }

    /// Load tracks for many playlists with one query, preserving playlist order.
    async fn attach_tracks(
        pool: &PgPool,
        playlists: Vec<Playlist>,
    ) -> Result<Vec<PlaylistWithTracks>, sqlx::Error> {
        let ids: Vec<DbId> = playlists.iter().map(|p| p.id).collect();
        let mut by_playlist: HashMap<DbId, Vec<Track>> = HashMap::new();
        for track in track_repo::TrackRepo::list_for_playlists(pool, &ids).await? {
            by_playlist.entry(track.playlist_id).or_default().push(track);
        }

        Ok(playlists
            .into_iter()
            .map(|playlist| {
                let tracks = by_playlist.remove(&playlist.id).unwrap_or_default();
                PlaylistWithTracks { playlist, tracks }
            })
            .collect())
    }
}
