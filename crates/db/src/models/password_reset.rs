//! Single-use password reset tokens.

use moodtunes_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub struct CreatePasswordResetToken {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
