//! LLM playlist drafting.
//!
//! Two call sites with different tolerance:
//!
//! - [`PlaylistGenerator::generate`] always returns a draft. Any call or
//!   parse failure yields [`fallback_playlist`]; the requested count is
//!   advisory.
//! - [`PlaylistGenerator::generate_template_tracks`] asks for an exact
//!   count but only logs a mismatch; it returns `None` when the reply does
//!   not parse or has no complete track.

use std::sync::Arc;

use moodtunes_core::prompts::{template_prompt, PLAYLIST_SYSTEM, TEMPLATE_SYSTEM};
use moodtunes_db::models::specialized_playlist::CachedTrack;
use moodtunes_llm::{ChatModel, ChatRequest};
use serde_json::Value;

pub const FALLBACK_PLAYLIST_NAME: &str = "Default Fallback Playlist";

const FALLBACK_TRACKS: [(&str, &str, &str); 5] = [
    ("Happy", "Pharrell Williams", "3:53"),
    ("Good Feeling", "Flo Rida", "4:08"),
    ("Walking on Sunshine", "Katrina & The Waves", "3:58"),
    ("Uptown Funk", "Mark Ronson ft. Bruno Mars", "4:30"),
    ("Can't Stop the Feeling!", "Justin Timberlake", "3:56"),
];

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// One LLM-suggested track before catalog verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftTrack {
    pub title: String,
    pub artist: String,
    /// Raw duration text as the model wrote it (`"3:45"`, `"245"`).
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPlaylist {
    /// `None` when the model gave no usable title.
    pub name: Option<String>,
    pub tracks: Vec<DraftTrack>,
    pub is_fallback: bool,
}

/// The fixed five-track playlist used whenever generation fails.
pub fn fallback_playlist() -> DraftPlaylist {
    DraftPlaylist {
        name: Some(FALLBACK_PLAYLIST_NAME.to_string()),
        tracks: FALLBACK_TRACKS
            .iter()
            .map(|(title, artist, duration)| DraftTrack {
                title: title.to_string(),
                artist: artist.to_string(),
                duration: Some(duration.to_string()),
            })
            .collect(),
        is_fallback: true,
    }
}

/// Duration as text; numbers are kept in their JSON spelling.
fn duration_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_blank_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a `{playlist_name, tracks}` reply.
///
/// Both keys must exist and `tracks` must be an array. Tracks missing
/// fields are kept with placeholders; non-object entries are dropped.
fn parse_playlist(reply: &str) -> Result<DraftPlaylist, String> {
    let value: Value = serde_json::from_str(reply).map_err(|e| format!("invalid JSON: {e}"))?;
    let object = value.as_object().ok_or("response is not a JSON object")?;

    let name = object
        .get("playlist_name")
        .ok_or("missing 'playlist_name' key")?;
    let tracks = object
        .get("tracks")
        .ok_or("missing 'tracks' key")?
        .as_array()
        .ok_or("'tracks' is not a list")?;

    let mut drafts = Vec::with_capacity(tracks.len());
    for (index, track) in tracks.iter().enumerate() {
        let Some(fields) = track.as_object() else {
            tracing::warn!(index, %track, "Dropping non-object track entry");
            continue;
        };
        if !["title", "artist", "duration"]
            .iter()
            .all(|k| fields.contains_key(*k))
        {
            tracing::warn!(index, %track, "Track is missing fields");
        }
        drafts.push(DraftTrack {
            title: non_blank_str(fields.get("title")).unwrap_or_else(|| UNKNOWN_TITLE.into()),
            artist: non_blank_str(fields.get("artist")).unwrap_or_else(|| UNKNOWN_ARTIST.into()),
            duration: duration_text(fields.get("duration")),
        });
    }

    Ok(DraftPlaylist {
        name: non_blank_str(Some(name)),
        tracks: drafts,
        is_fallback: false,
    })
}

/// Parse a `{tracks}` template reply into cache entries.
fn parse_template_tracks(reply: &str, name: &str, song_count: u32) -> Option<Vec<CachedTrack>> {
    let value: Value = match serde_json::from_str(reply) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(playlist = name, error = %e, "Template reply is not JSON");
            return None;
        }
    };
    let Some(tracks) = value.get("tracks").and_then(Value::as_array) else {
        tracing::error!(playlist = name, "Template reply has no 'tracks' list");
        return None;
    };

    if tracks.len() != song_count as usize {
        tracing::warn!(
            playlist = name,
            returned = tracks.len(),
            requested = song_count,
            "Track count mismatch; using the returned tracks",
        );
    }

    let valid: Vec<CachedTrack> = tracks
        .iter()
        .enumerate()
        .filter_map(|(index, track)| {
            let title = track.get("title").and_then(Value::as_str);
            let artist = track.get("artist").and_then(Value::as_str);
            // The key must be present; an explicit null is cached as unknown.
            let duration = track.get("duration").map(|d| duration_text(Some(d)));
            match (title, artist, duration) {
                (Some(title), Some(artist), Some(duration)) => Some(CachedTrack {
                    id: index as i32,
                    title: title.to_string(),
                    artist: artist.to_string(),
                    duration,
                    spotify_track_id: track
                        .get("spotify_track_id")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                }),
                _ => {
                    tracing::warn!(playlist = name, %track, "Skipping invalid template track");
                    None
                }
            }
        })
        .collect();

    if valid.is_empty() {
        tracing::error!(playlist = name, "No valid tracks in template reply");
        return None;
    }
    Some(valid)
}

/// Drafts playlists with the chat model.
#[derive(Clone)]
pub struct PlaylistGenerator {
    llm: Arc<dyn ChatModel>,
}

impl PlaylistGenerator {
    pub fn new(llm: Arc<dyn ChatModel>) -> Self {
        Self { llm }
    }

    /// Draft a mood playlist from a fully composed prompt.
    pub async fn generate(&self, prompt: &str) -> DraftPlaylist {
        let request = ChatRequest::chat(PLAYLIST_SYSTEM, prompt).json();

        let reply = match self.llm.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Playlist generation call failed; using fallback");
                return fallback_playlist();
            }
        };

        match parse_playlist(&reply) {
            Ok(draft) => draft,
            Err(reason) => {
                tracing::error!(%reason, reply, "Playlist reply rejected; using fallback");
                fallback_playlist()
            }
        }
    }

    /// Generate cached tracks for a specialized playlist template.
    pub async fn generate_template_tracks(
        &self,
        name: &str,
        keywords: &str,
        song_count: u32,
    ) -> Option<Vec<CachedTrack>> {
        tracing::info!(playlist = name, song_count, "Generating specialized playlist tracks");
        let request =
            ChatRequest::chat(TEMPLATE_SYSTEM, template_prompt(name, keywords, song_count)).json();

        match self.llm.complete(&request).await {
            Ok(reply) => parse_template_tracks(&reply, name, song_count),
            Err(e) => {
                tracing::error!(playlist = name, error = %e, "Template generation call failed");
                None
            }
        }
    }
}
