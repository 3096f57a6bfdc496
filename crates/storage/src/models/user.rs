use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A player account as provisioned by the identity provider.
///
/// Ratings are averages over every review the user has received, kept up to
/// date whenever a captain submits reviews for a completed match.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub photo_url: Option<String>,
    pub level: Option<String>,
    pub position: Option<String>,
    pub skill_rating: f64,
    pub sportsmanship_rating: f64,
    pub reviews_count: i32,
    pub no_show_count: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
