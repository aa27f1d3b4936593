use axum::routing::{get, post};
use axum::Router;

use crate::handlers::moods;
use crate::state::AppState;

/// Routes mounted at `/moods`.
///
/// ```text
/// POST /playlist        -> create_playlist
/// GET  /history         -> history
/// POST /recommendation  -> recommendation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/playlist", post(moods::create_playlist))
        .route("/history", get(moods::history))
        .route("/recommendation", post(moods::recommendation))
}
