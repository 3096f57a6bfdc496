use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "review_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    Skill,
    Sportsmanship,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PlayerReview {
    pub review_id: Uuid,
    pub match_id: Uuid,
    pub reviewer_id: Uuid,
    pub subject_id: Uuid,
    pub review_type: ReviewType,
    pub rating: i16,
    pub created_at: chrono::NaiveDateTime,
}
