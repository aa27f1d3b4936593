//! Single-track regeneration from user feedback.

use std::sync::Arc;

use chrono::{Datelike, Local};
use moodtunes_core::mood::Season;
use moodtunes_core::prompts::{replacement_prompt, ReplacementPromptInput, REPLACEMENT_SYSTEM};
use moodtunes_db::models::mood_entry::MoodEntry;
use moodtunes_db::models::track::{ReplaceTrack, Track};
use moodtunes_llm::{ChatModel, ChatRequest};
use serde_json::Value;

/// Genre used in the prompt when the user has no stored preference.
const UNKNOWN_GENRE: &str = "Unknown";

/// Feedback on one track plus the context it was generated in.
pub struct ReplacementRequest<'a> {
    pub mood: &'a MoodEntry,
    pub favorite_genre: Option<&'a str>,
    /// Every track of the playlist, including the one being replaced.
    pub playlist_tracks: &'a [Track],
    pub track: &'a Track,
    pub rating: i32,
    pub comment: &'a str,
}

#[derive(Clone)]
pub struct TrackReplacer {
    llm: Arc<dyn ChatModel>,
}

impl TrackReplacer {
    pub fn new(llm: Arc<dyn ChatModel>) -> Self {
        Self { llm }
    }

    /// Ask for one replacement song. `None` on any call or parse failure;
    /// the caller leaves the track untouched in that case.
    pub async fn suggest(&self, request: &ReplacementRequest<'_>) -> Option<ReplaceTrack> {
        let prompt = replacement_prompt(&prompt_input(request));
        let chat = ChatRequest::chat(REPLACEMENT_SYSTEM, prompt).json();

        let reply = match self.llm.complete(&chat).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(track_id = request.track.id, error = %e, "Replacement call failed");
                return None;
            }
        };

        let parsed = parse_replacement(&reply);
        if parsed.is_none() {
            tracing::error!(track_id = request.track.id, reply, "Replacement reply rejected");
        }
        parsed
    }
}

fn prompt_input<'a>(request: &'a ReplacementRequest<'a>) -> ReplacementPromptInput<'a> {
    let recorded = request.mood.recorded_at.with_timezone(&Local);
    ReplacementPromptInput {
        mood_text: &request.mood.mood_text,
        energy_level: request.mood.energy_level,
        genre: request
            .favorite_genre
            .filter(|g| !g.trim().is_empty())
            .unwrap_or(UNKNOWN_GENRE),
        season: Season::from_label(&request.mood.season)
            .unwrap_or_else(|| Season::from_month(recorded.month())),
        recorded_at: recorded.format("%H:%M").to_string(),
        other_tracks: request
            .playlist_tracks
            .iter()
            .filter(|t| t.id != request.track.id)
            .map(|t| (t.title.as_str(), t.artist.as_str()))
            .collect(),
        title: &request.track.title,
        artist: &request.track.artist,
        rating: request.rating,
        comment: request.comment,
    }
}

/// A single object with string `title` and `artist` and a `duration` key.
fn parse_replacement(reply: &str) -> Option<ReplaceTrack> {
    let value: Value = serde_json::from_str(reply).ok()?;
    let title = value.get("title")?.as_str()?.trim();
    let artist = value.get("artist")?.as_str()?.trim();
    let duration = match value.get("duration")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    if title.is_empty() || artist.is_empty() {
        return None;
    }
    Some(ReplaceTrack {
        title: title.to_string(),
        artist: artist.to_string(),
        duration,
    })
}
