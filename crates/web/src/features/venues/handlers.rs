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
        field::{CreateFieldRequest, FieldResponse, UpdateFieldRequest},
        venue::{CreateVenueRequest, UpdateVenueRequest, VenueResponse},
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/venues",
    params(PaginationParams),
    responses(
        (status = 200, description = "Venues with their fields", body = PaginatedResponse<VenueResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "venues"
)]
pub async fn list_venues(
    State(db): State<Database>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let (venues, total_items) = services::list_venues(db.pool(), &params).await?;

    Ok(Json(PaginatedResponse::new(venues, params, total_items)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/venues",
    request_body = CreateVenueRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Venue created", body = VenueResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Caller already owns a venue")
    ),
    tag = "venues"
)]
pub async fn create_venue(
    State(db): State<Database>,
    auth: AuthUser,
    Json(req): Json<CreateVenueRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let venue = services::create_venue(db.pool(), auth.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(venue)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/venues/{venue_id}/fields",
    params(
        ("venue_id" = Uuid, Path, description = "Venue ID")
    ),
    request_body = CreateFieldRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Field added to the venue", body = FieldResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller does not own the venue"),
        (status = 404, description = "Venue not found")
    ),
    tag = "venues"
)]
pub async fn create_field(
    State(db): State<Database>,
    auth: AuthUser,
    Path(venue_id): Path<Uuid>,
    Json(req): Json<CreateFieldRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let field = services::create_field(db.pool(), venue_id, auth.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(FieldResponse::from(field))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/venues/{venue_id}",
    params(
        ("venue_id" = Uuid, Path, description = "Venue ID")
    ),
    request_body = UpdateVenueRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Venue updated", body = VenueResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller does not own the venue"),
        (status = 404, description = "Venue not found")
    ),
    tag = "venues"
)]
pub async fn update_venue(
    State(db): State<Database>,
    auth: AuthUser,
    Path(venue_id): Path<Uuid>,
    Json(req): Json<UpdateVenueRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let venue = services::update_venue(db.pool(), venue_id, auth.user_id, &req).await?;

    Ok(Json(venue).into_response())
}

#[utoipa::path(
    put,
    path = "/api/venues/fields/{field_id}",
    params(
        ("field_id" = Uuid, Path, description = "Field ID")
    ),
    request_body = UpdateFieldRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Field updated", body = FieldResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller does not own the field's venue"),
        (status = 404, description = "Field not found")
    ),
    tag = "venues"
)]
pub async fn update_field(
    State(db): State<Database>,
    auth: AuthUser,
    Path(field_id): Path<Uuid>,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let field = services::update_field(db.pool(), field_id, auth.user_id, &req).await?;

    Ok(Json(FieldResponse::from(field)).into_response())
}
