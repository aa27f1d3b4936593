//! Persistence seams for the pipeline.
//!
//! The service code only talks to these traits; [`PgPlaylistStore`] and
//! [`PgTemplateStore`] route them to the repositories.

use async_trait::async_trait;
use chrono::NaiveDate;
use moodtunes_core::types::DbId;
use moodtunes_db::models::mood_entry::{CreateMoodEntry, MoodEntry};
use moodtunes_db::models::playlist::{CreatePlaylist, PlaylistWithTracks};
use moodtunes_db::models::specialized_playlist::{
    CachedTrack, CreateSpecializedPlaylist, SpecializedPlaylist,
};
use moodtunes_db::models::track::NewTrack;
use moodtunes_db::repositories::{
    MoodEntryRepo, PlaylistRepo, SpecializedPlaylistRepo, UserPreferenceRepo,
};
use moodtunes_db::DbPool;

/// Writes performed by one playlist-generation request.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    async fn save_favorite_genre(&self, user_id: DbId, genre: &str) -> Result<(), sqlx::Error>;

    async fn create_mood_entry(&self, input: &CreateMoodEntry) -> Result<MoodEntry, sqlx::Error>;

    /// Insert the playlist and all tracks atomically.
    async fn create_playlist(
        &self,
        input: &CreatePlaylist,
        tracks: &[NewTrack],
    ) -> Result<PlaylistWithTracks, sqlx::Error>;

    /// Remove a mood entry and anything hanging off it.
    async fn delete_mood_entry(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

/// Specialized-playlist template storage.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Insert by unique name if missing; `true` when created.
    async fn ensure_template(
        &self,
        input: &CreateSpecializedPlaylist,
    ) -> Result<(SpecializedPlaylist, bool), sqlx::Error>;

    async fn list_templates(&self) -> Result<Vec<SpecializedPlaylist>, sqlx::Error>;

    async fn save_tracks(
        &self,
        id: DbId,
        tracks: &[CachedTrack],
        refreshed_on: NaiveDate,
    ) -> Result<(), sqlx::Error>;
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgPlaylistStore {
    pool: DbPool,
}

impl PgPlaylistStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaylistStore for PgPlaylistStore {
    async fn save_favorite_genre(&self, user_id: DbId, genre: &str) -> Result<(), sqlx::Error> {
        UserPreferenceRepo::upsert_favorite_genre(&self.pool, user_id, genre).await?;
        Ok(())
    }

    async fn create_mood_entry(&self, input: &CreateMoodEntry) -> Result<MoodEntry, sqlx::Error> {
        MoodEntryRepo::create(&self.pool, input).await
    }

    async fn create_playlist(
        &self,
        input: &CreatePlaylist,
        tracks: &[NewTrack],
    ) -> Result<PlaylistWithTracks, sqlx::Error> {
        PlaylistRepo::create_with_tracks(&self.pool, input, tracks).await
    }

    async fn delete_mood_entry(&self, id: DbId) -> Result<bool, sqlx::Error> {
        MoodEntryRepo::delete(&self.pool, id).await
    }
}

#[derive(Clone)]
pub struct PgTemplateStore {
    pool: DbPool,
}

impl PgTemplateStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn ensure_template(
        &self,
        input: &CreateSpecializedPlaylist,
    ) -> Result<(SpecializedPlaylist, bool), sqlx::Error> {
        SpecializedPlaylistRepo::get_or_create(&self.pool, input).await
    }

    async fn list_templates(&self) -> Result<Vec<SpecializedPlaylist>, sqlx::Error> {
        SpecializedPlaylistRepo::list(&self.pool).await
    }

    async fn save_tracks(
        &self,
        id: DbId,
        tracks: &[CachedTrack],
        refreshed_on: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        SpecializedPlaylistRepo::update_cache(&self.pool, id, tracks, refreshed_on)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(())
    }
}
