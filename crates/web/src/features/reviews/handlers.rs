use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::review::{SubmitReviewsRequest, SubmitReviewsResponse},
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/reviews/match/{match_id}",
    params(
        ("match_id" = Uuid, Path, description = "Completed match ID")
    ),
    request_body = SubmitReviewsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Reviews and no-show marks stored", body = SubmitReviewsResponse),
        (status = 400, description = "Invalid rating or review subject"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Match not completed or reviews already submitted")
    ),
    tag = "reviews"
)]
pub async fn submit_reviews(
    State(db): State<Database>,
    auth: AuthUser,
    Path(match_id): Path<Uuid>,
    Json(req): Json<SubmitReviewsRequest>,
) -> Result<Response, WebError> {
    let response = services::submit_reviews(db.pool(), match_id, auth.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(response)).into_response())
}
