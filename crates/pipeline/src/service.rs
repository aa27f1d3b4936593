//! The mood-to-playlist request orchestrator.

use std::net::IpAddr;
use std::sync::Arc;

use moodtunes_catalog::{CatalogLookup, MarketResolver};
use moodtunes_core::mood::{MomentContext, MoodCategory};
use moodtunes_core::prompts::{playlist_prompt, PlaylistPromptInput};
use moodtunes_core::types::DbId;
use moodtunes_db::models::mood_entry::{CreateMoodEntry, MoodEntry};
use moodtunes_db::models::playlist::{CreatePlaylist, PlaylistWithTracks};
use moodtunes_llm::ChatModel;
use serde::Serialize;

use crate::assembly::verify_tracks;
use crate::categorizer::MoodCategorizer;
use crate::generator::PlaylistGenerator;
use crate::store::PlaylistStore;
use crate::PipelineError;

const NAME_PREFIX_CHARS: usize = 20;

/// Validated input for one playlist generation.
#[derive(Debug, Clone)]
pub struct MoodPlaylistRequest {
    pub user_id: DbId,
    pub mood_text: String,
    pub detected_emotion_text: String,
    pub energy_level: i32,
    pub favorite_genre: String,
    /// Already clamped to the allowed range.
    pub song_count: u32,
    pub playlist_goal: Option<String>,
    pub client_ip: Option<IpAddr>,
}

impl MoodPlaylistRequest {
    /// Text recorded on the mood entry: typed mood, else detected emotion.
    pub fn tracked_text(&self) -> &str {
        if self.mood_text.is_empty() {
            &self.detected_emotion_text
        } else {
            &self.mood_text
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodPlaylistOutcome {
    pub mood: MoodEntry,
    pub playlist: PlaylistWithTracks,
    pub verified_count: usize,
    pub fallback_count: usize,
}

/// `Mood Playlist (<first 20 chars>...)`, used when the draft has no name.
pub fn default_playlist_name(tracked_text: &str) -> String {
    let prefix: String = tracked_text.chars().take(NAME_PREFIX_CHARS).collect();
    format!("Mood Playlist ({prefix}...)")
}

pub struct MoodPlaylistService {
    categorizer: MoodCategorizer,
    generator: PlaylistGenerator,
    lookup: CatalogLookup,
    markets: Arc<MarketResolver>,
    store: Arc<dyn PlaylistStore>,
}

impl MoodPlaylistService {
    pub fn new(
        llm: Arc<dyn ChatModel>,
        lookup: CatalogLookup,
        markets: Arc<MarketResolver>,
        store: Arc<dyn PlaylistStore>,
    ) -> Self {
        Self {
            categorizer: MoodCategorizer::new(llm.clone()),
            generator: PlaylistGenerator::new(llm),
            lookup,
            markets,
            store,
        }
    }

    /// Run the pipeline against the server's local clock.
    pub async fn generate(
        &self,
        request: &MoodPlaylistRequest,
    ) -> Result<MoodPlaylistOutcome, PipelineError> {
        self.generate_at(request, MomentContext::now()).await
    }

    /// Run the pipeline for a fixed season and time of day.
    ///
    /// Once the mood entry exists, any failure deletes it again so no
    /// entry is left without a playlist.
    pub async fn generate_at(
        &self,
        request: &MoodPlaylistRequest,
        moment: MomentContext,
    ) -> Result<MoodPlaylistOutcome, PipelineError> {
        let tracked = request.tracked_text();
        let category = self.categorizer.categorize(tracked).await;
        tracing::info!(user_id = request.user_id, %category, "Mood categorized");

        self.store
            .save_favorite_genre(request.user_id, &request.favorite_genre)
            .await?;

        let mood = self
            .store
            .create_mood_entry(&CreateMoodEntry {
                user_id: request.user_id,
                mood_text: tracked.to_string(),
                energy_level: request.energy_level,
                season: moment.season.to_string(),
                category: category.to_string(),
            })
            .await?;

        match self.build_playlist(request, &mood, category, moment).await {
            Ok((playlist, verified_count, fallback_count)) => {
                tracing::info!(
                    user_id = request.user_id,
                    mood_id = mood.id,
                    playlist_id = playlist.playlist.id,
                    verified_count,
                    fallback_count,
                    "Playlist created",
                );
                Ok(MoodPlaylistOutcome {
                    mood,
                    playlist,
                    verified_count,
                    fallback_count,
                })
            }
            Err(e) => {
                tracing::error!(user_id = request.user_id, mood_id = mood.id, error = %e, "Playlist generation failed; removing mood entry");
                if let Err(delete_err) = self.store.delete_mood_entry(mood.id).await {
                    tracing::error!(mood_id = mood.id, error = %delete_err, "Failed to remove mood entry");
                }
                Err(e)
            }
        }
    }

    async fn build_playlist(
        &self,
        request: &MoodPlaylistRequest,
        mood: &MoodEntry,
        category: MoodCategory,
        moment: MomentContext,
    ) -> Result<(PlaylistWithTracks, usize, usize), PipelineError> {
        let prompt = playlist_prompt(&PlaylistPromptInput {
            mood_text: Some(request.mood_text.as_str()),
            detected_emotion: Some(request.detected_emotion_text.as_str()),
            category,
            moment,
            energy_level: request.energy_level,
            favorite_genre: &request.favorite_genre,
            song_count: request.song_count,
            playlist_goal: request.playlist_goal.as_deref(),
        });

        let draft = self.generator.generate(&prompt).await;
        if draft.is_fallback {
            tracing::warn!(mood_id = mood.id, "Using fallback playlist");
        }
        let name = draft
            .name
            .clone()
            .unwrap_or_else(|| default_playlist_name(&mood.mood_text));

        let market = self
            .markets
            .resolve(Some(&request.favorite_genre), request.client_ip);
        let assembled = verify_tracks(&self.lookup, &draft.tracks, market.as_deref()).await;

        let playlist = self
            .store
            .create_playlist(
                &CreatePlaylist {
                    mood_entry_id: mood.id,
                    name,
                    prompt_used: prompt,
                    llm_fallback_count: assembled.fallback as i32,
                },
                &assembled.tracks,
            )
            .await?;

        Ok((playlist, assembled.verified, assembled.fallback))
    }
}
