//! Handlers for the `/moods` resource: playlist generation, mood history
//! and coping advice.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use moodtunes_core::limits::{clamp_song_count, validate_energy_level, DEFAULT_FAVORITE_GENRE};
use moodtunes_db::models::mood_entry::MoodEntryWithPlaylists;
use moodtunes_db::repositories::MoodEntryRepo;
use moodtunes_pipeline::service::{MoodPlaylistOutcome, MoodPlaylistRequest};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client_ip::ClientIp;
use crate::response::DataResponse;
use crate::state::AppState;

const PLAYLIST_FAILED_MESSAGE: &str = "Failed to generate playlist. Please try again later.";
const ADVICE_FAILED_MESSAGE: &str =
    "Failed to get emotion-based recommendation. Please try again later.";

#[derive(Debug, Deserialize)]
pub struct CreateMoodPlaylistRequest {
    #[serde(default)]
    pub mood_text: String,
    #[serde(default)]
    pub detected_emotion_text: String,
    pub energy_level: Option<i32>,
    pub favorite_genre: Option<String>,
    pub song_count: Option<i64>,
    pub playlist_goal: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub mood_text: String,
    #[serde(default)]
    pub detected_emotion_text: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub advice_list: Vec<String>,
}

/// POST /api/v1/moods/playlist
///
/// Runs the full categorize, generate, verify and persist pipeline.
pub async fn create_playlist(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ClientIp(client_ip): ClientIp,
    Json(input): Json<CreateMoodPlaylistRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MoodPlaylistOutcome>>)> {
    let request = MoodPlaylistRequest {
        user_id: auth_user.user_id,
        mood_text: input.mood_text.trim().to_string(),
        detected_emotion_text: input.detected_emotion_text.trim().to_string(),
        energy_level: validate_energy_level(input.energy_level)?,
        favorite_genre: input
            .favorite_genre
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .unwrap_or_else(|| DEFAULT_FAVORITE_GENRE.to_string()),
        song_count: clamp_song_count(input.song_count),
        playlist_goal: input.playlist_goal,
        client_ip,
    };

    let outcome = state.playlists.generate(&request).await.map_err(|e| {
        tracing::error!(
            user_id = auth_user.user_id,
            username = %auth_user.username,
            error = %e,
            "Mood playlist pipeline failed",
        );
        AppError::Upstream(PLAYLIST_FAILED_MESSAGE.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// GET /api/v1/moods/history
pub async fn history(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<MoodEntryWithPlaylists>>>> {
    let entries = MoodEntryRepo::list_for_user_with_playlists(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/moods/recommendation
pub async fn recommendation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let mood_text = input.mood_text.trim();
    let feeling = if mood_text.is_empty() {
        input.detected_emotion_text.trim()
    } else {
        mood_text
    };
    if feeling.is_empty() {
        return Err(AppError::BadRequest(
            "Mood text or detected emotion is required for recommendations.".into(),
        ));
    }

    let advice_list = state.emotion.advice(feeling).await.map_err(|e| {
        tracing::error!(user_id = auth_user.user_id, error = %e, "Coping advice failed");
        AppError::Upstream(ADVICE_FAILED_MESSAGE.to_string())
    })?;

    Ok(Json(RecommendationResponse { advice_list }))
}
