//! Handlers for the `/auth` resource (register, login, refresh, logout,
//! password reset).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use moodtunes_core::error::{CoreError, FieldErrors};
use moodtunes_db::models::password_reset::CreatePasswordResetToken;
use moodtunes_db::models::session::CreateSession;
use moodtunes_db::models::user::{CreateUser, User, UserResponse};
use moodtunes_db::repositories::{PasswordResetRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{issue_access_token, sha256_hex, OpaqueToken};
use crate::auth::password::{hash_password, validate_password_rules, verify_password};
use crate::auth::reset::{decode_uid, generate_reset_token, hash_reset_token, reset_link};
use crate::error::{field_errors, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client_ip::ClientIp;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

const RESET_REQUESTED_MESSAGE: &str =
    "Password reset email has been sent if an account with this email exists.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters."))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email format."))]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetConfirm {
    pub uidb64: String,
    pub token: String,
    pub new_password1: String,
    pub new_password2: String,
}

/// Returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Every field problem (including all password rule violations) is
/// reported in one response.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let mut fields = match input.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => field_errors(&errors),
    };
    let problems = validate_password_rules(&input.password);
    if !problems.is_empty() {
        fields.insert("password".to_string(), problems);
    }
    if !fields.is_empty() {
        return Err(CoreError::InvalidFields(fields).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    UserRepo::record_login(&state.pool, user.id).await?;

    let session = SessionContext::from_request(&headers, client_ip);
    Ok(Json(create_auth_response(&state, &user, session).await?))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair; the old session is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = sha256_hex(input.refresh_token.trim());

    let session = SessionRepo::redeem(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let session = SessionContext::from_request(&headers, client_ip);
    Ok(Json(create_auth_response(&state, &user, session).await?))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(
        user_id = auth_user.user_id,
        username = %auth_user.username,
        revoked,
        "Logged out",
    );
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/password-reset
///
/// Always answers with the same message so the endpoint cannot be used
/// to find out which emails are registered.
pub async fn password_reset_request(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;

    let Some(user) = UserRepo::find_active_by_email(&state.pool, input.email.trim()).await? else {
        tracing::debug!("Password reset requested for unknown email");
        return Ok(Json(MessageResponse::new(RESET_REQUESTED_MESSAGE)));
    };

    let token = generate_reset_token();
    let expires_at =
        Utc::now() + chrono::Duration::minutes(state.config.password_reset_expiry_mins);
    PasswordResetRepo::create(
        &state.pool,
        &CreatePasswordResetToken {
            user_id: user.id,
            token_hash: token.hash,
            expires_at,
        },
    )
    .await?;

    let link = reset_link(&state.config.frontend_url, user.id, &token.plaintext);
    match &state.mailer {
        Some(mailer) => {
            if let Err(e) = mailer
                .send_password_reset(&user.email, &user.username, &link)
                .await
            {
                tracing::error!(user_id = user.id, error = %e, "Failed to send password reset email");
            }
        }
        None => {
            tracing::warn!(
                user_id = user.id,
                "SMTP not configured; password reset email not sent"
            );
        }
    }

    Ok(Json(MessageResponse::new(RESET_REQUESTED_MESSAGE)))
}

/// POST /api/v1/auth/password-reset/confirm
pub async fn password_reset_confirm(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetConfirm>,
) -> AppResult<Json<MessageResponse>> {
    let user = match decode_uid(&input.uidb64) {
        Some(id) => UserRepo::find_by_id(&state.pool, id)
            .await?
            .filter(|u| u.is_active),
        None => None,
    }
    .ok_or_else(|| CoreError::field("uidb64", "Invalid user ID."))?;

    let reset = PasswordResetRepo::find_valid(&state.pool, user.id, &hash_reset_token(&input.token))
        .await?
        .ok_or_else(|| CoreError::field("token", "Invalid or expired token."))?;

    check_new_password(&input.new_password1, &input.new_password2)?;

    let password_hash = hash_password(&input.new_password1)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent confirm may have consumed the token first.
    if !PasswordResetRepo::mark_used(&state.pool, reset.id).await? {
        return Err(CoreError::field("token", "Invalid or expired token.").into());
    }
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;
    SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "Password reset completed");
    Ok(Json(MessageResponse::new(
        "Password has been reset successfully.",
    )))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Confirmation match first, then the composition rules on `new_password1`.
pub(crate) fn check_new_password(new_password1: &str, new_password2: &str) -> Result<(), CoreError> {
    if new_password1 != new_password2 {
        return Err(CoreError::field(
            "new_password2",
            "The two password fields didn't match.",
        ));
    }
    let problems = validate_password_rules(new_password1);
    if !problems.is_empty() {
        let mut fields = FieldErrors::new();
        fields.insert("new_password1".to_string(), problems);
        return Err(CoreError::InvalidFields(fields));
    }
    Ok(())
}

/// Client details recorded on a new session.
struct SessionContext {
    user_agent: Option<String>,
    ip_address: Option<String>,
}

impl SessionContext {
    fn from_request(headers: &HeaderMap, client_ip: Option<std::net::IpAddr>) -> Self {
        Self {
            user_agent: headers
                .get(axum::http::header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            ip_address: client_ip.map(|ip| ip.to_string()),
        }
    }
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: &User,
    session: SessionContext,
) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = issue_access_token(user.id, &user.username, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh = OpaqueToken::refresh();

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh.hash,
            expires_at: jwt.refresh_expires_at(Utc::now()),
            user_agent: session.user_agent,
            ip_address: session.ip_address,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: jwt.access_ttl_secs(),
        user: UserResponse::from(user),
    })
}
