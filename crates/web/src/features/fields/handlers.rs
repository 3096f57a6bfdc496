use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::field::{
        FieldResponse, GenerateScheduleRequest, GenerateScheduleResponse, SlotQuery, SlotResponse,
    },
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/fields",
    responses(
        (status = 200, description = "List all fields successfully", body = Vec<FieldResponse>)
    ),
    tag = "fields"
)]
pub async fn list_fields(State(db): State<Database>) -> Result<Response, WebError> {
    let fields = services::list_fields(db.pool()).await?;

    let response: Vec<FieldResponse> = fields.into_iter().map(FieldResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/fields/{field_id}/generate-schedule",
    params(
        ("field_id" = Uuid, Path, description = "Field ID")
    ),
    request_body = GenerateScheduleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Slots generated; existing ones were skipped", body = GenerateScheduleResponse),
        (status = 400, description = "Invalid date or time range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller does not own the field's venue"),
        (status = 404, description = "Field not found")
    ),
    tag = "fields"
)]
pub async fn generate_schedule(
    State(db): State<Database>,
    auth: AuthUser,
    Path(field_id): Path<Uuid>,
    Json(req): Json<GenerateScheduleRequest>,
) -> Result<Response, WebError> {
    let created = services::generate_schedule(db.pool(), field_id, auth.user_id, &req).await?;

    let response = GenerateScheduleResponse {
        created,
        message: format!("Created {created} slots"),
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/fields/{field_id}/slots",
    params(
        ("field_id" = Uuid, Path, description = "Field ID"),
        SlotQuery
    ),
    responses(
        (status = 200, description = "Slots of the field on the requested day", body = Vec<SlotResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Field not found")
    ),
    tag = "fields"
)]
pub async fn list_slots(
    State(db): State<Database>,
    Path(field_id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Response, WebError> {
    let slots = services::list_slots(db.pool(), field_id, &query).await?;

    Ok(Json(slots).into_response())
}
