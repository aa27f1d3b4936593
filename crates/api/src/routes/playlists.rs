//! Route definitions for the `/playlists` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::playlists;
use crate::state::AppState;

/// Routes mounted at `/playlists`.
///
/// ```text
/// GET    /history                               -> history
/// POST   /{id}/tracks                           -> add_track
/// POST   /{id}/tracks/reorder                   -> reorder_tracks
/// POST   /{id}/tracks/find-and-add              -> find_and_add_track
/// DELETE /{id}/tracks/{track_id}                -> remove_track
/// POST   /{id}/tracks/{track_id}/replace        -> replace_track
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", get(playlists::history))
        .route("/{id}/tracks", post(playlists::add_track))
        .route("/{id}/tracks/reorder", post(playlists::reorder_tracks))
        .route("/{id}/tracks/find-and-add", post(playlists::find_and_add_track))
        .route("/{id}/tracks/{track_id}", delete(playlists::remove_track))
        .route(
            "/{id}/tracks/{track_id}/replace",
            post(playlists::replace_track),
        )
}
