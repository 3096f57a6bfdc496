use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_profile, update_profile};

pub fn routes() -> Router<Database> {
    Router::new().route("/me", get(get_profile).put(update_profile))
}
