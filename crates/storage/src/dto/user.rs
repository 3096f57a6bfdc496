use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::User;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub photo_url: Option<String>,
    pub level: Option<String>,
    pub position: Option<String>,
    pub skill_rating: f64,
    pub sportsmanship_rating: f64,
    pub reviews_count: i32,
    pub no_show_count: i32,
}

impl From<User> for UserProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id,
            email: user.email,
            full_name: user.full_name,
            photo_url: user.photo_url,
            level: user.level,
            position: user.position,
            skill_rating: user.skill_rating,
            sportsmanship_rating: user.sportsmanship_rating,
            reviews_count: user.reviews_count,
            no_show_count: user.no_show_count,
        }
    }
}

/// Partial profile update; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,

    #[validate(length(max = 100))]
    pub level: Option<String>,

    #[validate(length(max = 100))]
    pub position: Option<String>,
}
