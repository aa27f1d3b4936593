//! Scripted doubles for the pipeline's trait seams.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use moodtunes_catalog::{CatalogError, CatalogTrack, TrackSearch};
use moodtunes_core::types::DbId;
use moodtunes_db::models::mood_entry::{CreateMoodEntry, MoodEntry};
use moodtunes_db::models::playlist::{CreatePlaylist, Playlist, PlaylistWithTracks};
use moodtunes_db::models::specialized_playlist::{
    CachedTrack, CreateSpecializedPlaylist, SpecializedPlaylist,
};
use moodtunes_db::models::track::{NewTrack, Track};
use moodtunes_llm::{ChatModel, ChatRequest, LlmError};
use sqlx::types::Json;

use crate::store::{PlaylistStore, TemplateStore};

/// Replays canned completions in order and records every request.
pub struct ScriptedChat {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<ChatRequest>>,
    configured: bool,
}

impl ScriptedChat {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            configured: true,
        })
    }

    pub fn replying(replies: &[&str]) -> Arc<Self> {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            configured: false,
        })
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.configured {
            return Err(LlmError::NotConfigured);
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }
}

/// Catalog that knows a fixed set of `(title, artist)` pairs.
///
/// Exact queries hit when both match; loose queries return every known
/// track with that title.
pub struct FixedCatalog {
    known: Vec<CatalogTrack>,
    pub calls: Mutex<usize>,
}

impl FixedCatalog {
    pub fn new(known: &[(&str, &str, u64)]) -> Arc<Self> {
        Arc::new(Self {
            known: known
                .iter()
                .map(|(title, artist, ms)| CatalogTrack {
                    name: title.to_string(),
                    artists: vec![artist.to_string()],
                    album: Some(format!("{title} (Album)")),
                    duration_ms: *ms,
                    uri: format!("spotify:track:{}", title.replace(' ', "")),
                })
                .collect(),
            calls: Mutex::new(0),
        })
    }
}

#[async_trait]
impl TrackSearch for FixedCatalog {
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        _market: Option<&str>,
    ) -> Result<Vec<CatalogTrack>, CatalogError> {
        *self.calls.lock().unwrap() += 1;
        let rest = query.trim_start_matches("track:");
        let (title, artist) = match rest.split_once(" artist:") {
            Some((t, a)) => (t, Some(a)),
            None => (rest, None),
        };
        Ok(self
            .known
            .iter()
            .filter(|t| t.name == title && artist.is_none_or(|a| t.artists[0] == a))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// In-memory [`PlaylistStore`]; can be told to fail playlist inserts.
#[derive(Default)]
pub struct MemoryPlaylistStore {
    preferences: Mutex<HashMap<DbId, String>>,
    moods: Mutex<Vec<MoodEntry>>,
    playlists: Mutex<Vec<PlaylistWithTracks>>,
    deleted: Mutex<usize>,
    fail_playlists: bool,
}

impl MemoryPlaylistStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_playlists() -> Arc<Self> {
        Arc::new(Self {
            fail_playlists: true,
            ..Self::default()
        })
    }

    pub fn favorite_genre(&self, user_id: DbId) -> Option<String> {
        self.preferences.lock().unwrap().get(&user_id).cloned()
    }

    pub fn mood_entry_count(&self) -> usize {
        self.moods.lock().unwrap().len()
    }

    pub fn deleted_mood_entries(&self) -> usize {
        *self.deleted.lock().unwrap()
    }
}

#[async_trait]
impl PlaylistStore for MemoryPlaylistStore {
    async fn save_favorite_genre(&self, user_id: DbId, genre: &str) -> Result<(), sqlx::Error> {
        self.preferences
            .lock()
            .unwrap()
            .insert(user_id, genre.to_string());
        Ok(())
    }

    async fn create_mood_entry(&self, input: &CreateMoodEntry) -> Result<MoodEntry, sqlx::Error> {
        let mut moods = self.moods.lock().unwrap();
        let now = Utc::now();
        let entry = MoodEntry {
            id: moods.len() as DbId + 1,
            user_id: input.user_id,
            mood_text: input.mood_text.clone(),
            energy_level: input.energy_level,
            season: input.season.clone(),
            category: input.category.clone(),
            recorded_at: now,
            created_at: now,
            updated_at: now,
        };
        moods.push(entry.clone());
        Ok(entry)
    }

    async fn create_playlist(
        &self,
        input: &CreatePlaylist,
        tracks: &[NewTrack],
    ) -> Result<PlaylistWithTracks, sqlx::Error> {
        if self.fail_playlists {
            return Err(sqlx::Error::Protocol("simulated insert failure".to_string()));
        }
        let mut playlists = self.playlists.lock().unwrap();
        let now = Utc::now();
        let id = playlists.len() as DbId + 1;
        let created = PlaylistWithTracks {
            playlist: Playlist {
                id,
                mood_entry_id: input.mood_entry_id,
                name: input.name.clone(),
                prompt_used: input.prompt_used.clone(),
                llm_fallback_count: input.llm_fallback_count,
                total_tracks_generated: tracks.len() as i32,
                created_at: now,
                updated_at: now,
            },
            tracks: tracks
                .iter()
                .enumerate()
                .map(|(position, t)| Track {
                    id: id * 100 + position as DbId,
                    playlist_id: id,
                    title: t.title.clone(),
                    artist: t.artist.clone(),
                    album: t.album.clone(),
                    duration: t.duration.clone(),
                    catalog_uri: t.catalog_uri.clone(),
                    position: position as i32,
                    created_at: now,
                    updated_at: now,
                })
                .collect(),
        };
        playlists.push(created.clone());
        Ok(created)
    }

    async fn delete_mood_entry(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut moods = self.moods.lock().unwrap();
        let before = moods.len();
        moods.retain(|m| m.id != id);
        self.playlists
            .lock()
            .unwrap()
            .retain(|p| p.playlist.mood_entry_id != id);
        let removed = moods.len() < before;
        if removed {
            *self.deleted.lock().unwrap() += 1;
        }
        Ok(removed)
    }
}

/// In-memory [`TemplateStore`] keyed by unique name.
#[derive(Default)]
pub struct MemoryTemplateStore {
    rows: Mutex<Vec<SpecializedPlaylist>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn rows(&self) -> Vec<SpecializedPlaylist> {
        self.rows.lock().unwrap().clone()
    }

    /// Pre-populate a row as if an earlier refresh had run.
    pub fn insert(&self, name: &str, tracks: Vec<CachedTrack>, refreshed: Option<NaiveDate>) {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let id = rows.len() as DbId + 1;
        rows.push(SpecializedPlaylist {
            id,
            name: name.to_string(),
            description: String::new(),
            keywords: name.to_lowercase(),
            target_song_count: 10,
            cached_tracks: Some(Json(tracks)),
            last_refreshed_date: refreshed,
            created_at: now,
            updated_at: now,
        });
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn ensure_template(
        &self,
        input: &CreateSpecializedPlaylist,
    ) -> Result<(SpecializedPlaylist, bool), sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.iter().find(|r| r.name == input.name) {
            return Ok((existing.clone(), false));
        }
        let now = Utc::now();
        let row = SpecializedPlaylist {
            id: rows.len() as DbId + 1,
            name: input.name.clone(),
            description: input.description.clone(),
            keywords: input.keywords.clone(),
            target_song_count: input.target_song_count,
            cached_tracks: None,
            last_refreshed_date: None,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok((row, true))
    }

    async fn list_templates(&self) -> Result<Vec<SpecializedPlaylist>, sqlx::Error> {
        Ok(self.rows())
    }

    async fn save_tracks(
        &self,
        id: DbId,
        tracks: &[CachedTrack],
        refreshed_on: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(sqlx::Error::RowNotFound)?;
        row.cached_tracks = Some(Json(tracks.to_vec()));
        row.last_refreshed_date = Some(refreshed_on);
        Ok(())
    }
}
