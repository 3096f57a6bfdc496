use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::user::{UpdateProfileRequest, UserProfileResponse},
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/users/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Caller's profile with ratings", body = UserProfileResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users"
)]
pub async fn get_profile(
    State(db): State<Database>,
    auth: AuthUser,
) -> Result<Response, WebError> {
    let user = services::get_profile(db.pool(), auth.user_id).await?;

    Ok(Json(UserProfileResponse::from(user)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/users/me",
    request_body = UpdateProfileRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile updated", body = UserProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users"
)]
pub async fn update_profile(
    State(db): State<Database>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::update_profile(db.pool(), auth.user_id, &req).await?;

    Ok(Json(UserProfileResponse::from(user)).into_response())
}
