use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{Result, StorageError};
use crate::models::MatchStatus;

/// Request payload for creating a match against an available slot
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMatchRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    pub slot_id: Uuid,

    #[validate(range(min = 2, max = 100, message = "max_players must be between 2 and 100"))]
    #[serde(default = "default_max_players")]
    pub max_players: i32,

    #[serde(default = "default_true")]
    pub waitlist_enabled: bool,

    #[serde(default)]
    pub is_private: bool,
}

fn default_max_players() -> i32 {
    10
}

fn default_true() -> bool {
    true
}

/// Public projection of a user as seen from a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PlayerInfo {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub photo_url: Option<String>,
    pub level: Option<String>,
    pub position: Option<String>,
    pub skill_rating: f64,
    pub sportsmanship_rating: f64,
    pub no_show_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldInfo {
    pub id: Uuid,
    pub sport: String,
    pub address: String,
    pub price: Decimal,
}

/// Match as listed on the public board
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchSummary {
    pub id: Uuid,
    pub title: String,
    pub starts_at: NaiveDateTime,
    pub max_players: i32,
    pub players_count: i64,
    pub status: MatchStatus,
    pub captain: PlayerInfo,
    pub field: FieldInfo,
    pub slot_id: Uuid,
    pub waitlist_enabled: bool,
    pub is_private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
}

/// Full match aggregate: every mutating match operation returns this snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchDetailResponse {
    #[serde(flatten)]
    pub summary: MatchSummary,
    pub players: Vec<PlayerInfo>,
    pub waitlist: Vec<PlayerInfo>,
}

impl MatchDetailResponse {
    fn includes(&self, user_id: Uuid) -> bool {
        self.summary.captain.id == user_id
            || self.players.iter().any(|p| p.id == user_id)
            || self.waitlist.iter().any(|p| p.id == user_id)
    }

    /// Hides the invite code from anyone who is neither captain nor member.
    pub fn redact_invite_for(mut self, viewer: Option<Uuid>) -> Self {
        if !viewer.is_some_and(|viewer| self.includes(viewer)) {
            self.summary.invite_code = None;
        }
        self
    }

    /// The match as `viewer` may see it when looked up by id.
    ///
    /// A private match is reported as `NotFound` to anyone outside it; they
    /// reach it through its invite code instead.
    pub fn visible_to(self, viewer: Option<Uuid>) -> Result<Self> {
        let member = viewer.is_some_and(|viewer| self.includes(viewer));
        if self.summary.is_private && !member {
            return Err(StorageError::NotFound);
        }
        Ok(self.redact_invite_for(viewer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use validator::Validate;

    fn player(id: Uuid) -> PlayerInfo {
        PlayerInfo {
            id,
            full_name: None,
            photo_url: None,
            level: None,
            position: None,
            skill_rating: 0.0,
            sportsmanship_rating: 0.0,
            no_show_count: 0,
        }
    }

    fn private_match(captain: Uuid, member: Uuid) -> MatchDetailResponse {
        MatchDetailResponse {
            summary: MatchSummary {
                id: Uuid::new_v4(),
                title: "Evening 5x5".into(),
                starts_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                    .unwrap()
                    .and_hms_opt(19, 0, 0)
                    .unwrap(),
                max_players: 10,
                players_count: 2,
                status: MatchStatus::Active,
                captain: player(captain),
                field: FieldInfo {
                    id: Uuid::new_v4(),
                    sport: "football".into(),
                    address: "Abay 10".into(),
                    price: Decimal::from(500),
                },
                slot_id: Uuid::new_v4(),
                waitlist_enabled: true,
                is_private: true,
                invite_code: Some("k3v9x0q2m7ab".into()),
            },
            players: vec![player(captain), player(member)],
            waitlist: vec![],
        }
    }

    #[test]
    fn test_invite_code_visible_to_members() {
        let (captain, member) = (Uuid::new_v4(), Uuid::new_v4());
        let detail = private_match(captain, member).redact_invite_for(Some(member));
        assert!(detail.summary.invite_code.is_some());
    }

    #[test]
    fn test_invite_code_hidden_from_strangers() {
        let (captain, member) = (Uuid::new_v4(), Uuid::new_v4());
        let detail = private_match(captain, member).redact_invite_for(Some(Uuid::new_v4()));
        assert!(detail.summary.invite_code.is_none());
        let anonymous = private_match(captain, member).redact_invite_for(None);
        assert!(anonymous.summary.invite_code.is_none());
    }

    #[test]
    fn test_private_match_hidden_from_outsiders_by_id() {
        let (captain, member) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(matches!(
            private_match(captain, member).visible_to(None),
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            private_match(captain, member).visible_to(Some(Uuid::new_v4())),
            Err(StorageError::NotFound)
        ));

        let seen = private_match(captain, member).visible_to(Some(captain)).unwrap();
        assert_eq!(seen.summary.invite_code.as_deref(), Some("k3v9x0q2m7ab"));
    }

    #[test]
    fn test_public_match_visible_to_anyone_without_code() {
        let mut detail = private_match(Uuid::new_v4(), Uuid::new_v4());
        detail.summary.is_private = false;
        detail.summary.invite_code = None;

        let seen = detail.visible_to(None).unwrap();
        assert!(seen.summary.invite_code.is_none());
    }

    #[test]
    fn test_detail_serializes_contract_fields() {
        let captain = Uuid::new_v4();
        let detail = private_match(captain, Uuid::new_v4());
        let json = serde_json::to_value(&detail).unwrap();
        for key in [
            "id",
            "title",
            "starts_at",
            "max_players",
            "players_count",
            "status",
            "is_private",
            "invite_code",
            "slot_id",
            "players",
            "waitlist",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["captain"]["id"], serde_json::json!(captain));
        assert_eq!(json["field"]["sport"], "football");
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateMatchRequest =
            serde_json::from_value(serde_json::json!({"title": "Pickup", "slot_id": Uuid::new_v4()}))
                .unwrap();
        assert_eq!(req.max_players, 10);
        assert!(req.waitlist_enabled);
        assert!(!req.is_private);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_single_player_match() {
        let req = CreateMatchRequest {
            title: "Solo".into(),
            slot_id: Uuid::new_v4(),
            max_players: 1,
            waitlist_enabled: false,
            is_private: false,
        };
        assert!(req.validate().is_err());
    }
}
