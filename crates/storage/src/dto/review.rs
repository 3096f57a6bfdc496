use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::ReviewType;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewInput {
    pub subject_id: Uuid,
    pub review_type: ReviewType,
    pub rating: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoShowInput {
    pub subject_id: Uuid,
}

/// Everything a captain reports about a completed match, stored all-or-nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SubmitReviewsRequest {
    #[serde(default)]
    pub reviews: Vec<ReviewInput>,
    #[serde(default)]
    pub no_shows: Vec<NoShowInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitReviewsResponse {
    pub match_id: Uuid,
    pub reviews_recorded: usize,
    pub no_shows_recorded: usize,
}
