use sqlx::PgPool;
use storage::{
    dto::review::{SubmitReviewsRequest, SubmitReviewsResponse},
    error::Result,
    repository::review::ReviewRepository,
};
use uuid::Uuid;

pub async fn submit_reviews(
    pool: &PgPool,
    match_id: Uuid,
    reviewer_id: Uuid,
    request: &SubmitReviewsRequest,
) -> Result<SubmitReviewsResponse> {
    let repo = ReviewRepository::new(pool);
    repo.submit(match_id, reviewer_id, request).await
}
