pub mod account;
pub mod auth;
pub mod emotion;
pub mod health;
pub mod moods;
pub mod playlists;
pub mod specialized;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register, /auth/login, /auth/refresh           public
/// /auth/password-reset, /auth/password-reset/confirm   public
/// /auth/logout                                         requires auth
///
/// /account/profile                                     get, update
/// /account/change-password                             change password
///
/// /moods/playlist                                      generate mood playlist
/// /moods/history                                       mood history
/// /moods/recommendation                                coping advice
///
/// /playlists/history                                   playlist history
/// /playlists/{id}/tracks                               add track
/// /playlists/{id}/tracks/reorder                       reorder
/// /playlists/{id}/tracks/find-and-add                  catalog-verified add
/// /playlists/{id}/tracks/{track_id}                    remove track
/// /playlists/{id}/tracks/{track_id}/replace            AI replacement
///
/// /specialized-playlists                               list templates
///
/// /emotion/analyze                                     image emotion (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/account", account::router())
        .nest("/moods", moods::router())
        .nest("/playlists", playlists::router())
        .nest("/specialized-playlists", specialized::router())
        .nest("/emotion", emotion::router())
}
