//! Handlers for the `/account` resource (profile, password change).

use axum::extract::State;
use axum::Json;
use moodtunes_core::error::CoreError;
use moodtunes_core::types::DbId;
use moodtunes_db::models::user::{UpdateUser, User};
use moodtunes_db::repositories::{SessionRepo, UserPreferenceRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::check_new_password;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// Last genre used for a playlist, if any.
    pub favorite_genre: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters."))]
    pub username: Option<String>,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}

/// GET /api/v1/account/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let user = load_user(&state, auth_user.user_id).await?;
    Ok(Json(DataResponse {
        data: profile_of(&state, user).await?,
    }))
}

/// PUT /api/v1/account/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    input.validate()?;

    let patch = UpdateUser {
        username: input.username.map(|u| u.trim().to_string()),
        email: input.email.map(|e| e.trim().to_string()),
    };
    let user = UserRepo::update(&state.pool, auth_user.user_id, &patch)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        })?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(Json(DataResponse {
        data: profile_of(&state, user).await?,
    }))
}

/// POST /api/v1/account/change-password
///
/// Existing sessions are revoked; the client must log in again.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = load_user(&state, auth_user.user_id).await?;

    let old_valid = verify_password(&input.old_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !old_valid {
        return Err(CoreError::field(
            "old_password",
            "Your old password was entered incorrectly. Please enter it again.",
        )
        .into());
    }

    check_new_password(&input.new_password1, &input.new_password2)?;

    let password_hash = hash_password(&input.new_password1)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;
    SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(Json(MessageResponse::new("Password updated successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: user_id,
            })
        })
}

async fn profile_of(state: &AppState, user: User) -> AppResult<ProfileResponse> {
    let favorite_genre = UserPreferenceRepo::find_by_user(&state.pool, user.id)
        .await?
        .map(|p| p.favorite_genre);
    Ok(ProfileResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        favorite_genre,
    })
}
