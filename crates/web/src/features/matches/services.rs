use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginationParams,
        matches::{CreateMatchRequest, MatchDetailResponse, MatchSummary},
    },
    error::Result,
    repository::matches::MatchRepository,
};
use uuid::Uuid;

/// Book a slot and open a match on it, captained by the caller
pub async fn create_match(
    pool: &PgPool,
    captain_id: Uuid,
    request: &CreateMatchRequest,
) -> Result<MatchDetailResponse> {
    let repo = MatchRepository::new(pool);
    repo.create(captain_id, request).await
}

/// List public active matches with pagination
pub async fn list_matches(
    pool: &PgPool,
    params: &PaginationParams,
) -> Result<(Vec<MatchSummary>, i64)> {
    let repo = MatchRepository::new(pool);
    repo.list_active(params).await
}

pub async fn get_match(pool: &PgPool, match_id: Uuid) -> Result<MatchDetailResponse> {
    let repo = MatchRepository::new(pool);
    repo.find_detail(match_id).await
}

pub async fn get_match_by_invite(pool: &PgPool, code: &str) -> Result<MatchDetailResponse> {
    let repo = MatchRepository::new(pool);
    repo.find_by_invite(code).await
}

pub async fn join_match(pool: &PgPool, match_id: Uuid, user_id: Uuid) -> Result<MatchDetailResponse> {
    let repo = MatchRepository::new(pool);
    repo.join(match_id, user_id).await
}

pub async fn leave_match(pool: &PgPool, match_id: Uuid, user_id: Uuid) -> Result<MatchDetailResponse> {
    let repo = MatchRepository::new(pool);
    repo.leave(match_id, user_id).await
}

pub async fn complete_match(
    pool: &PgPool,
    match_id: Uuid,
    actor_id: Uuid,
) -> Result<MatchDetailResponse> {
    let repo = MatchRepository::new(pool);
    repo.complete(match_id, actor_id).await
}

pub async fn cancel_match(
    pool: &PgPool,
    match_id: Uuid,
    actor_id: Uuid,
) -> Result<MatchDetailResponse> {
    let repo = MatchRepository::new(pool);
    repo.cancel(match_id, actor_id).await
}
