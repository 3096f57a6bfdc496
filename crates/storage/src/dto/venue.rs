use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::field::FieldResponse;
use crate::models::Venue;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateVenueRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub phone_number: Option<String>,
}

/// Partial venue update; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateVenueRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VenueResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub phone_number: Option<String>,
    pub fields: Vec<FieldResponse>,
}

impl VenueResponse {
    pub fn new(venue: Venue, fields: Vec<FieldResponse>) -> Self {
        Self {
            id: venue.venue_id,
            owner_id: venue.owner_id,
            title: venue.title,
            description: venue.description,
            phone_number: venue.phone_number,
            fields,
        }
    }
}
