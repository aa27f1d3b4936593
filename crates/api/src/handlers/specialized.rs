//! Handlers for the `/specialized-playlists` resource.

use axum::extract::State;
use axum::Json;
use moodtunes_db::models::specialized_playlist::SpecializedPlaylist;
use moodtunes_db::repositories::SpecializedPlaylistRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/specialized-playlists
///
/// Templates with whatever tracks the last refresh cached.
pub async fn list(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SpecializedPlaylist>>>> {
    let playlists = SpecializedPlaylistRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: playlists }))
}
