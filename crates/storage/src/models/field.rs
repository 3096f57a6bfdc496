use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Field {
    pub field_id: Uuid,
    pub venue_id: Uuid,
    pub sport: String,
    pub address: String,
    pub price_per_hour: Decimal,
    pub description: Option<String>,
    pub amenities: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
