use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{generate_schedule, list_fields, list_slots};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_fields))
        .route("/:field_id/generate-schedule", post(generate_schedule))
        .route("/:field_id/slots", get(list_slots))
}
