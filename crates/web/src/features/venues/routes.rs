use axum::{
    Router,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{create_field, create_venue, list_venues, update_field, update_venue};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_venues).post(create_venue))
        .route("/:venue_id", put(update_venue))
        .route("/:venue_id/fields", post(create_field))
        .route("/fields/:field_id", put(update_field))
}
