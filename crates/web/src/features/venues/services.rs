use std::collections::HashMap;

use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginationParams,
        field::{CreateFieldRequest, FieldResponse, UpdateFieldRequest},
        venue::{CreateVenueRequest, UpdateVenueRequest, VenueResponse},
    },
    error::{Result, StorageError},
    models::Field,
    repository::{field::FieldRepository, venue::VenueRepository},
};
use uuid::Uuid;

/// List venues with their fields
pub async fn list_venues(
    pool: &PgPool,
    params: &PaginationParams,
) -> Result<(Vec<VenueResponse>, i64)> {
    let (venues, total_items) = VenueRepository::new(pool).list(params).await?;

    let venue_ids: Vec<Uuid> = venues.iter().map(|v| v.venue_id).collect();
    let mut fields_by_venue: HashMap<Uuid, Vec<FieldResponse>> = HashMap::new();
    for field in FieldRepository::new(pool).list_for_venues(&venue_ids).await? {
        fields_by_venue
            .entry(field.venue_id)
            .or_default()
            .push(FieldResponse::from(field));
    }

    let response = venues
        .into_iter()
        .map(|venue| {
            let fields = fields_by_venue.remove(&venue.venue_id).unwrap_or_default();
            VenueResponse::new(venue, fields)
        })
        .collect();

    Ok((response, total_items))
}

pub async fn create_venue(
    pool: &PgPool,
    owner_id: Uuid,
    request: &CreateVenueRequest,
) -> Result<VenueResponse> {
    let venue = VenueRepository::new(pool).create(owner_id, request).await?;
    tracing::info!(venue_id = %venue.venue_id, %owner_id, "Venue created");
    Ok(VenueResponse::new(venue, Vec::new()))
}

/// Add a field to a venue; only the venue owner may do so
pub async fn create_field(
    pool: &PgPool,
    venue_id: Uuid,
    actor_id: Uuid,
    request: &CreateFieldRequest,
) -> Result<Field> {
    let venue = VenueRepository::new(pool).find_by_id(venue_id).await?;
    if venue.owner_id != actor_id {
        return Err(StorageError::NotFieldOwner);
    }

    let field = FieldRepository::new(pool).create(venue_id, request).await?;
    tracing::info!(field_id = %field.field_id, %venue_id, "Field created");
    Ok(field)
}

pub async fn update_venue(
    pool: &PgPool,
    venue_id: Uuid,
    actor_id: Uuid,
    request: &UpdateVenueRequest,
) -> Result<VenueResponse> {
    let venue = VenueRepository::new(pool)
        .update(venue_id, actor_id, request)
        .await?;
    let fields = FieldRepository::new(pool)
        .list_for_venues(&[venue_id])
        .await?
        .into_iter()
        .map(FieldResponse::from)
        .collect();

    tracing::info!(%venue_id, "Venue updated");
    Ok(VenueResponse::new(venue, fields))
}

/// Update a field of the caller's venue. A price change applies to every slot
/// without its own override.
pub async fn update_field(
    pool: &PgPool,
    field_id: Uuid,
    actor_id: Uuid,
    request: &UpdateFieldRequest,
) -> Result<Field> {
    let field = FieldRepository::new(pool)
        .update(field_id, actor_id, request)
        .await?;
    tracing::info!(%field_id, price_per_hour = %field.price_per_hour, "Field updated");
    Ok(field)
}
