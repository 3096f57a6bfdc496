use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user::UpdateProfileRequest;
use crate::error::{Result, StorageError};
use crate::models::User;

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, full_name, photo_url, level, position,
                   skill_rating, sportsmanship_rating, reviews_count, no_show_count,
                   created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Apply the provided profile fields, leaving absent ones untouched
    pub async fn update_profile(&self, user_id: Uuid, req: &UpdateProfileRequest) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = COALESCE($2, full_name),
                level = COALESCE($3, level),
                position = COALESCE($4, position),
                updated_at = CURRENT_TIMESTAMP
            WHERE user_id = $1
            RETURNING user_id, email, full_name, photo_url, level, position,
                      skill_rating, sportsmanship_rating, reviews_count, no_show_count,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&req.full_name)
        .bind(&req.level)
        .bind(&req.position)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
