use sqlx::PgPool;
use storage::{
    dto::user::UpdateProfileRequest, error::Result, models::User,
    repository::user::UserRepository,
};
use uuid::Uuid;

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.find_by_id(user_id).await
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    request: &UpdateProfileRequest,
) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.update_profile(user_id, request).await
}
