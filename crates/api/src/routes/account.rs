use axum::routing::{get, post};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/account`.
///
/// ```text
/// GET  /profile          -> get_profile
/// PUT  /profile          -> update_profile
/// POST /change-password  -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(account::get_profile).put(account::update_profile),
        )
        .route("/change-password", post(account::change_password))
}
