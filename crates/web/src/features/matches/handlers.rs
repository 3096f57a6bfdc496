use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        matches::{CreateMatchRequest, MatchDetailResponse, MatchSummary},
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};

use super::services;

#[utoipa::path(
    post,
    path = "/api/matches",
    request_body = CreateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Match created on the requested slot", body = MatchDetailResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Slot not found"),
        (status = 409, description = "Slot is not available")
    ),
    tag = "matches"
)]
pub async fn create_match(
    State(db): State<Database>,
    auth: AuthUser,
    Json(req): Json<CreateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let detail = services::create_match(db.pool(), auth.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(detail)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches",
    params(PaginationParams),
    responses(
        (status = 200, description = "Public active matches, earliest first", body = PaginatedResponse<MatchSummary>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "matches"
)]
pub async fn list_matches(
    State(db): State<Database>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let (matches, total_items) = services::list_matches(db.pool(), &params).await?;

    Ok(Json(PaginatedResponse::new(matches, params, total_items)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{match_id}",
    params(
        ("match_id" = Uuid, Path, description = "Match ID")
    ),
    responses(
        (status = 200, description = "Match with roster and waitlist", body = MatchDetailResponse),
        (status = 401, description = "Invalid access token"),
        (status = 404, description = "Match not found, or private and the caller is not a member")
    ),
    tag = "matches"
)]
pub async fn get_match(
    State(db): State<Database>,
    viewer: MaybeAuthUser,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::get_match(db.pool(), match_id)
        .await?
        .visible_to(viewer.user_id())?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/invite/{code}",
    params(
        ("code" = String, Path, description = "Invite code of a private match")
    ),
    responses(
        (status = 200, description = "Match behind the invite code", body = MatchDetailResponse),
        (status = 404, description = "Unknown or revoked invite code")
    ),
    tag = "matches"
)]
pub async fn get_match_by_invite(
    State(db): State<Database>,
    Path(code): Path<String>,
) -> Result<Response, WebError> {
    let detail = services::get_match_by_invite(db.pool(), &code).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches/{match_id}/join",
    params(
        ("match_id" = Uuid, Path, description = "Match ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Joined the roster or the waitlist", body = MatchDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Already joined, match full, or match not active")
    ),
    tag = "matches"
)]
pub async fn join_match(
    State(db): State<Database>,
    auth: AuthUser,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::join_match(db.pool(), match_id, auth.user_id).await?;

    Ok(Json(detail.redact_invite_for(Some(auth.user_id))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches/{match_id}/leave",
    params(
        ("match_id" = Uuid, Path, description = "Match ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Left the match; the waitlist head may have been promoted", body = MatchDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "The captain cannot leave"),
        (status = 404, description = "Match not found or caller is not a member"),
        (status = 409, description = "Match not active")
    ),
    tag = "matches"
)]
pub async fn leave_match(
    State(db): State<Database>,
    auth: AuthUser,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::leave_match(db.pool(), match_id, auth.user_id).await?;

    Ok(Json(detail.redact_invite_for(Some(auth.user_id))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches/{match_id}/complete",
    params(
        ("match_id" = Uuid, Path, description = "Match ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match marked as completed", body = MatchDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Match not active")
    ),
    tag = "matches"
)]
pub async fn complete_match(
    State(db): State<Database>,
    auth: AuthUser,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::complete_match(db.pool(), match_id, auth.user_id).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches/{match_id}/cancel",
    params(
        ("match_id" = Uuid, Path, description = "Match ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match cancelled and its slot released", body = MatchDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Match not active")
    ),
    tag = "matches"
)]
pub async fn cancel_match(
    State(db): State<Database>,
    auth: AuthUser,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::cancel_match(db.pool(), match_id, auth.user_id).await?;

    Ok(Json(detail).into_response())
}
