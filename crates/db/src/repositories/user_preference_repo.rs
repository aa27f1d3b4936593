//! Repository for the `user_preferences` table.

use moodtunes_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_preference::UserPreference;

const COLUMNS: &str = "id, user_id, favorite_genre, created_at, updated_at";

pub struct UserPreferenceRepo;

impl UserPreferenceRepo {
    /// Insert or overwrite the user's favorite genre.
    pub async fn upsert_favorite_genre(
        pool: &PgPool,
        user_id: DbId,
        favorite_genre: &str,
    ) -> Result<UserPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_preferences (user_id, favorite_genre)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_user_preferences_user_id
             DO UPDATE SET favorite_genre = EXCLUDED.favorite_genre
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserPreference>(&query)
            .bind(user_id)
            .bind(favorite_genre)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserPreference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_preferences WHERE user_id = $1");
        sqlx::query_as::<_, UserPreference>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
