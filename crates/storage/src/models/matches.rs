use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of a match: `active -> {completed, cancelled}`, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Active,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Match {
    pub match_id: Uuid,
    pub title: String,
    pub slot_id: Uuid,
    pub field_id: Uuid,
    pub captain_id: Uuid,
    pub starts_at: chrono::NaiveDateTime,
    pub max_players: i32,
    pub waitlist_enabled: bool,
    pub is_private: bool,
    pub invite_code: Option<String>,
    pub status: MatchStatus,
    pub created_at: chrono::NaiveDateTime,
}
