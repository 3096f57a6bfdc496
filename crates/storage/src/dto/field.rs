use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Field, SlotStatus};

/// Request payload for adding a field to a venue
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFieldRequest {
    #[validate(length(min = 1, max = 100, message = "Sport must be between 1 and 100 characters"))]
    pub sport: String,

    #[validate(length(min = 1, max = 512, message = "Address must be between 1 and 512 characters"))]
    pub address: String,

    #[validate(custom(function = "validate_price"))]
    pub price_per_hour: Decimal,

    pub description: Option<String>,

    #[validate(length(max = 512))]
    pub amenities: Option<String>,
}

/// Partial field update; a new `price_per_hour` reprices every slot without
/// an override.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFieldRequest {
    #[validate(length(min = 1, max = 100, message = "Sport must be between 1 and 100 characters"))]
    pub sport: Option<String>,

    #[validate(length(min = 1, max = 512, message = "Address must be between 1 and 512 characters"))]
    pub address: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price_per_hour: Option<Decimal>,

    pub description: Option<String>,

    #[validate(length(max = 512))]
    pub amenities: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldResponse {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub sport: String,
    pub address: String,
    pub price_per_hour: Decimal,
    pub description: Option<String>,
    pub amenities: Option<String>,
}

impl From<Field> for FieldResponse {
    fn from(field: Field) -> Self {
        Self {
            id: field.field_id,
            venue_id: field.venue_id,
            sport: field.sport,
            address: field.address,
            price_per_hour: field.price_per_hour,
            description: field.description,
            amenities: field.amenities,
        }
    }
}

/// Bulk slot generation over an inclusive date range.
///
/// Each day's `[start_time, end_time)` window is cut into back-to-back slots of
/// `slot_duration_minutes`; a trailing remainder shorter than one slot is dropped.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateScheduleRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "22:00:00")]
    pub end_time: NaiveTime,
    #[serde(default = "default_slot_duration")]
    pub slot_duration_minutes: i64,
}

fn default_slot_duration() -> i64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateScheduleResponse {
    pub created: u64,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SlotQuery {
    pub on_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SlotResponse {
    pub id: Uuid,
    pub field_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: SlotStatus,
    pub price: Decimal,
}

fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_price"));
    }
    Ok(())
}
