use axum::routing::get;
use axum::Router;

use crate::handlers::specialized;
use crate::state::AppState;

/// Routes mounted at `/specialized-playlists`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(specialized::list))
}
