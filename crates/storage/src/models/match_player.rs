use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "player_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Confirmed,
    Waitlist,
    /// Held a roster seat but was marked absent by the captain.
    Noshow,
}

impl PlayerStatus {
    /// Confirmed players and no-shows both occupied a roster seat.
    pub fn holds_seat(self) -> bool {
        !matches!(self, Self::Waitlist)
    }
}

/// Membership row. `seat_order` orders both the roster and the waitlist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MatchPlayer {
    pub match_id: Uuid,
    pub user_id: Uuid,
    pub status: PlayerStatus,
    pub seat_order: i64,
    pub joined_at: chrono::NaiveDateTime,
}
