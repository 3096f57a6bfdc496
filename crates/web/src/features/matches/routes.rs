use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    cancel_match, complete_match, create_match, get_match, get_match_by_invite, join_match,
    leave_match, list_matches,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_matches).post(create_match))
        .route("/invite/:code", get(get_match_by_invite))
        .route("/:match_id", get(get_match))
        .route("/:match_id/join", post(join_match))
        .route("/:match_id/leave", post(leave_match))
        .route("/:match_id/complete", post(complete_match))
        .route("/:match_id/cancel", post(cancel_match))
}
