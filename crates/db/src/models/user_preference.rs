//! Per-user listening preferences (one row per user).

use moodtunes_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPreference {
    pub id: DbId,
    pub user_id: DbId,
    pub favorite_genre: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
