use axum::{Router, routing::post};
use storage::Database;

use super::handlers::submit_reviews;

pub fn routes() -> Router<Database> {
    Router::new().route("/match/:match_id", post(submit_reviews))
}
