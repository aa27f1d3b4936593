//! Prompt text for every LLM persona the backend uses.
//!
//! Builders are pure so the exact wording can be unit tested without a
//! model. The wire-level message assembly lives in the pipeline crate.

use crate::mood::{MomentContext, MoodCategory, Season};

// ---------------------------------------------------------------------------
// System personas
// ---------------------------------------------------------------------------

pub const PLAYLIST_SYSTEM: &str =
    "You are an assistant that generates playlist names and song lists in JSON format.";

pub const REPLACEMENT_SYSTEM: &str = "You are an assistant that suggests a single replacement song based on feedback and playlist context. Output ONLY the JSON for the single song with keys 'title', 'artist', 'duration'.";

pub const TEMPLATE_SYSTEM: &str =
    "You are an assistant that generates song lists in JSON format.";

pub const ADVICE_SYSTEM: &str = "You are an assistant that provides general well-being advice for emotions. Output ONLY a JSON object with the key 'advice_list' containing an array of advice strings.";

pub const EMOTION_IMAGE_INSTRUCTION: &str = "Analyze the primary emotion displayed by the person in this image. Describe the emotion and any supporting facial cues. Respond concisely, focusing on the emotional state.";

/// Classification persona; embeds the label list.
pub fn classification_system() -> String {
    format!(
        "You are an assistant that classifies user mood descriptions into one of these categories: {}. You only output the single category name.",
        MoodCategory::label_list()
    )
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

pub fn classification_prompt(mood_text: &str) -> String {
    format!(
        "Given the user's mood description: '{mood_text}'\n\n\
         Classify this mood into ONE of the following categories: {}.\n\n\
         Return ONLY the name of the single most appropriate category. \
         If none seem to fit well or the description is unclear/irrelevant, return 'Other'.",
        MoodCategory::label_list()
    )
}

// ---------------------------------------------------------------------------
// Playlist generation
// ---------------------------------------------------------------------------

/// Everything that shapes a mood playlist prompt.
#[derive(Debug, Clone)]
pub struct PlaylistPromptInput<'a> {
    pub mood_text: Option<&'a str>,
    pub detected_emotion: Option<&'a str>,
    pub category: MoodCategory,
    pub moment: MomentContext,
    pub energy_level: i32,
    pub favorite_genre: &'a str,
    pub song_count: u32,
    pub playlist_goal: Option<&'a str>,
}

/// How the listener's state is phrased. A detected facial emotion takes
/// precedence over typed mood text.
fn feeling_description(mood_text: Option<&str>, detected: Option<&str>) -> String {
    fn present(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }
    match (present(detected), present(mood_text)) {
        (Some(d), _) => format!("whose facial expression was analyzed as '{d}'"),
        (None, Some(m)) => format!("is feeling '{m}'"),
        (None, None) => "is in an unspecified mood".to_string(),
    }
}

pub fn playlist_prompt(input: &PlaylistPromptInput<'_>) -> String {
    let mut prompt = format!(
        "Create a music playlist for someone who {} (overall mood categorized as {}). \
         It's currently {} in {}, their energy level is {}/10, \
         and they prefer {} music. ",
        feeling_description(input.mood_text, input.detected_emotion),
        input.category,
        input.moment.time_of_day,
        input.moment.season,
        input.energy_level,
        input.favorite_genre,
    );

    if let Some(goal) = input.playlist_goal.map(str::trim).filter(|g| !g.is_empty()) {
        prompt.push_str(&format!("The goal for this playlist is: '{goal}'. "));
    }

    prompt.push_str(&format!(
        "Return ONLY a JSON object (no extra text before or after) with two keys: \
         1. 'playlist_name': A short, creative title for the playlist (max 5 words). \
         2. 'tracks': A JSON array of exactly {} songs. \
         Each song in the array must have 'title', 'artist', and 'duration' fields. \
         Make sure the songs match the mood, category, time of day, energy level, and playlist goal if provided.",
        input.song_count
    ));
    prompt
}

// ---------------------------------------------------------------------------
// Single-track replacement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReplacementPromptInput<'a> {
    pub mood_text: &'a str,
    pub energy_level: i32,
    pub genre: &'a str,
    pub season: Season,
    /// Wall-clock time the mood entry was recorded, `HH:MM`.
    pub recorded_at: String,
    /// `(title, artist)` of every other track in the playlist.
    pub other_tracks: Vec<(&'a str, &'a str)>,
    pub title: &'a str,
    pub artist: &'a str,
    pub rating: i32,
    pub comment: &'a str,
}

pub fn replacement_prompt(input: &ReplacementPromptInput<'_>) -> String {
    let others = if input.other_tracks.is_empty() {
        "(This is the only song)".to_string()
    } else {
        input
            .other_tracks
            .iter()
            .map(|(title, artist)| format!("- {title} by {artist}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Context: A playlist was generated for a user feeling '{mood}' \
         with an energy level of {energy}/10. The preferred genre is '{genre}'. \
         It was {season} during the {time} when generated.\n\
         Current playlist songs (excluding the one being replaced):\n{others}\n\n\
         Feedback on Song: '{title}' by '{artist}'\n\
         - User Rating: {rating}/5\n\
         - User Comment: {comment}\n\n\
         Task: Suggest ONE replacement song (title, artist, duration) that fits the original mood/energy context \
         AND addresses the user's feedback. **Crucially, the replacement song MUST strictly be in the '{genre}' genre.** \
         The replacement should maintain the overall vibe while respecting the genre constraint. \
         Return ONLY the JSON object for the single replacement song with keys 'title', 'artist', 'duration'.",
        mood = input.mood_text,
        energy = input.energy_level,
        genre = input.genre,
        season = input.season,
        time = input.recorded_at,
        title = input.title,
        artist = input.artist,
        rating = input.rating,
        comment = input.comment,
    )
}

// ---------------------------------------------------------------------------
// Specialized templates
// ---------------------------------------------------------------------------

pub fn template_prompt(name: &str, keywords: &str, song_count: u32) -> String {
    format!(
        "Generate a music playlist titled something like '{name}' based on these characteristics or purpose: '{keywords}'. \
         The playlist should contain exactly {song_count} songs. \
         Return ONLY a JSON object (no extra text before or after the JSON) with a single key 'tracks'. \
         The value of 'tracks' should be a JSON array of these songs. \
         Each song in the array must be an object with 'title', 'artist', 'duration', and 'spotify_track_id' fields. \
         The 'spotify_track_id' should be a valid Spotify track ID. If a Spotify ID cannot be found, this field can be null. \
         Example: {{ \"tracks\": [{{ \"title\": \"Song Title\", \"artist\": \"Artist Name\", \"duration\": \"3:45\", \"spotify_track_id\": \"abcdef1234567890\" }}] }}"
    )
}

// ---------------------------------------------------------------------------
// Coping advice
// ---------------------------------------------------------------------------

pub fn advice_prompt(feeling: &str) -> String {
    format!(
        "A user is feeling: '{feeling}'. \
         Provide 2-3 concise, actionable coping strategies or pieces of advice specifically targeting the challenges or nature of this feeling. \
         Aim for advice that is distinct to '{feeling}' where possible, rather than generic well-being tips applicable to any mood. \
         Focus on emotional regulation or healthy perspective shifts. Do not suggest music. Avoid overly clinical language. \
         Return ONLY a JSON object with a single key 'advice_list' which is an array of strings, each string being one piece of advice."
    )
}
