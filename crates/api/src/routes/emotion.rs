use axum::routing::post;
use axum::Router;

use crate::handlers::emotion;
use crate::state::AppState;

/// Routes mounted at `/emotion` (public).
pub fn router() -> Router<AppState> {
    Router::new().route("/analyze", post(emotion::analyze))
}
