//! Handlers for the `/playlists` resource: history and track editing.
//!
//! Every lookup is scoped to the authenticated owner (playlist -> mood
//! entry -> user); a playlist owned by someone else is reported as missing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use moodtunes_core::error::CoreError;
use moodtunes_core::limits::parse_rating;
use moodtunes_core::types::DbId;
use moodtunes_db::models::playlist::{Playlist, PlaylistWithTracks};
use moodtunes_db::models::track::{NewTrack, Track};
use moodtunes_db::repositories::{MoodEntryRepo, PlaylistRepo, TrackRepo, UserPreferenceRepo};
use moodtunes_pipeline::replacement::ReplacementRequest;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client_ip::ClientIp;
use crate::response::DataResponse;
use crate::state::AppState;

const PLAYLIST_NOT_FOUND: &str = "Playlist not found or access denied.";
const TRACK_NOT_FOUND: &str = "Track not found in this playlist.";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReplaceTrackRequest {
    /// Integer or integer string, 1-5.
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddTrackRequest {
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub artist: String,
    pub album: Option<String>,
    pub catalog_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub track_ids: Vec<DbId>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FindTrackRequest {
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub artist: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/playlists/history
pub async fn history(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<PlaylistWithTracks>>>> {
    let playlists = PlaylistRepo::list_for_user_with_tracks(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: playlists }))
}

/// POST /api/v1/playlists/{id}/tracks/{track_id}/replace
///
/// Asks the model for one song addressing the feedback and rewrites the
/// track in place.
pub async fn replace_track(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((playlist_id, track_id)): Path<(DbId, DbId)>,
    Json(input): Json<ReplaceTrackRequest>,
) -> AppResult<Json<DataResponse<Track>>> {
    let playlist = owned_playlist(&state, playlist_id, auth_user.user_id).await?;
    let track = track_in(&state, playlist.id, track_id).await?;
    let rating = parse_rating(input.rating.as_ref())?;

    let mood = MoodEntryRepo::find_by_id(&state.pool, playlist.mood_entry_id)
        .await?
        .ok_or_else(|| not_found(PLAYLIST_NOT_FOUND))?;
    let favorite_genre = UserPreferenceRepo::find_by_user(&state.pool, auth_user.user_id)
        .await?
        .map(|p| p.favorite_genre);
    let playlist_tracks = TrackRepo::list_for_playlist(&state.pool, playlist.id).await?;

    let replacement = state
        .replacer
        .suggest(&ReplacementRequest {
            mood: &mood,
            favorite_genre: favorite_genre.as_deref(),
            playlist_tracks: &playlist_tracks,
            track: &track,
            rating,
            comment: input.comment.trim(),
        })
        .await
        .ok_or_else(|| AppError::Upstream("Failed to generate replacement song from AI.".into()))?;

    let updated = TrackRepo::replace_details(&state.pool, track.id, &replacement)
        .await?
        .ok_or_else(|| not_found(TRACK_NOT_FOUND))?;

    tracing::info!(
        user_id = auth_user.user_id,
        playlist_id,
        track_id,
        rating,
        "Track replaced",
    );
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/playlists/{id}/tracks/{track_id}
pub async fn remove_track(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((playlist_id, track_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let playlist = owned_playlist(&state, playlist_id, auth_user.user_id).await?;
    let track = track_in(&state, playlist.id, track_id).await?;

    TrackRepo::delete(&state.pool, track.id).await?;
    tracing::info!(playlist_id, track_id, title = %track.title, "Track removed");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/playlists/{id}/tracks
///
/// Appends after the current last position. Duration stays empty since
/// nothing verified it.
pub async fn add_track(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(playlist_id): Path<DbId>,
    Json(input): Json<AddTrackRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Track>>)> {
    let playlist = owned_playlist(&state, playlist_id, auth_user.user_id).await?;
    input.validate()?;

    let new_track = NewTrack {
        title: input.title.trim().to_string(),
        artist: input.artist.trim().to_string(),
        album: non_blank(input.album),
        duration: None,
        catalog_uri: non_blank(input.catalog_uri),
    };
    let track = TrackRepo::append(&state.pool, playlist.id, &new_track).await?;

    tracing::info!(playlist_id, track_id = track.id, "Track added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: track })))
}

/// POST /api/v1/playlists/{id}/tracks/reorder
///
/// Positions follow the order of `track_ids`. An id outside the playlist
/// rejects the whole request and nothing moves.
pub async fn reorder_tracks(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(playlist_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<PlaylistWithTracks>>> {
    let playlist = owned_playlist(&state, playlist_id, auth_user.user_id).await?;

    if input.track_ids.is_empty() {
        return Err(CoreError::field("track_ids", "This list may not be empty.").into());
    }
    if !TrackRepo::reorder(&state.pool, playlist.id, &input.track_ids).await? {
        return Err(CoreError::field(
            "track_ids",
            "One or more track IDs do not belong to this playlist.",
        )
        .into());
    }

    let updated = PlaylistRepo::find_owned_with_tracks(&state.pool, playlist.id, auth_user.user_id)
        .await?
        .ok_or_else(|| not_found(PLAYLIST_NOT_FOUND))?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/playlists/{id}/tracks/find-and-add
///
/// Adds the catalog's version of the song, biased toward the caller's
/// market.
pub async fn find_and_add_track(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ClientIp(client_ip): ClientIp,
    Path(playlist_id): Path<DbId>,
    Json(input): Json<FindTrackRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Track>>)> {
    input.validate()?;
    let playlist = owned_playlist(&state, playlist_id, auth_user.user_id).await?;

    let favorite_genre = UserPreferenceRepo::find_by_user(&state.pool, auth_user.user_id)
        .await?
        .map(|p| p.favorite_genre);
    let market = state.markets.resolve(favorite_genre.as_deref(), client_ip);

    let verified = state
        .catalog
        .lookup(input.title.trim(), input.artist.trim(), market.as_deref())
        .await
        .ok_or_else(|| not_found("Track not found on Spotify or error in search."))?;

    let new_track = NewTrack {
        title: verified.title,
        artist: verified.artist,
        album: verified.album,
        duration: Some(verified.duration),
        catalog_uri: Some(verified.uri),
    };
    let track = TrackRepo::append(&state.pool, playlist.id, &new_track).await?;

    tracing::info!(playlist_id, track_id = track.id, market, "Catalog track added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: track })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(message: &str) -> AppError {
    AppError::NotFound(message.to_string())
}

async fn owned_playlist(state: &AppState, playlist_id: DbId, user_id: DbId) -> AppResult<Playlist> {
    PlaylistRepo::find_owned(&state.pool, playlist_id, user_id)
        .await?
        .ok_or_else(|| not_found(PLAYLIST_NOT_FOUND))
}

async fn track_in(state: &AppState, playlist_id: DbId, track_id: DbId) -> AppResult<Track> {
    TrackRepo::find_in_playlist(&state.pool, playlist_id, track_id)
        .await?
        .ok_or_else(|| not_found(TRACK_NOT_FOUND))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_fields_become_none() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" Abbey Road ".into())).as_deref(), Some("Abbey Road"));
    }

    #[test]
    fn add_track_requires_title_and_artist() {
        let input = AddTrackRequest {
            title: String::new(),
            artist: "Someone".into(),
            album: None,
            catalog_uri: None,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(!errors.field_errors().contains_key("artist"));
    }
}
