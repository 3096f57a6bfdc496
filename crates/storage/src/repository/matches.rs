use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool, Postgres, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use super::slot::SlotRepository;
use crate::dto::common::PaginationParams;
use crate::dto::matches::{
    CreateMatchRequest, FieldInfo, MatchDetailResponse, MatchSummary, PlayerInfo,
};
use crate::error::{Result, StorageError};
use crate::models::{Match, MatchPlayer, MatchStatus, PlayerStatus};
use crate::services::invite_code;
use crate::services::membership::{Placement, Roster};

const INVITE_CODE_ATTEMPTS: usize = 5;

const SUMMARY_SELECT: &str = r#"
    SELECT m.match_id, m.title, m.slot_id, m.starts_at, m.max_players, m.status,
           m.waitlist_enabled, m.is_private, m.invite_code,
           (SELECT COUNT(*) FROM match_players mp
             WHERE mp.match_id = m.match_id AND mp.status <> 'waitlist') AS players_count,
           u.user_id AS captain_id, u.full_name AS captain_full_name,
           u.photo_url AS captain_photo_url, u.level AS captain_level,
           u.position AS captain_position, u.skill_rating AS captain_skill_rating,
           u.sportsmanship_rating AS captain_sportsmanship_rating,
           u.no_show_count AS captain_no_show_count,
           f.field_id, f.sport AS field_sport, f.address AS field_address,
           COALESCE(s.price_override, f.price_per_hour) AS price
    FROM matches m
    JOIN users u ON u.user_id = m.captain_id
    JOIN fields f ON f.field_id = m.field_id
    JOIN time_slots s ON s.slot_id = m.slot_id
"#;

#[derive(Debug, FromRow)]
struct SummaryRow {
    match_id: Uuid,
    title: String,
    slot_id: Uuid,
    starts_at: chrono::NaiveDateTime,
    max_players: i32,
    status: MatchStatus,
    waitlist_enabled: bool,
    is_private: bool,
    invite_code: Option<String>,
    players_count: i64,
    captain_id: Uuid,
    captain_full_name: Option<String>,
    captain_photo_url: Option<String>,
    captain_level: Option<String>,
    captain_position: Option<String>,
    captain_skill_rating: f64,
    captain_sportsmanship_rating: f64,
    captain_no_show_count: i32,
    field_id: Uuid,
    field_sport: String,
    field_address: String,
    price: Decimal,
}

impl From<SummaryRow> for MatchSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.match_id,
            title: row.title,
            starts_at: row.starts_at,
            max_players: row.max_players,
            players_count: row.players_count,
            status: row.status,
            captain: PlayerInfo {
                id: row.captain_id,
                full_name: row.captain_full_name,
                photo_url: row.captain_photo_url,
                level: row.captain_level,
                position: row.captain_position,
                skill_rating: row.captain_skill_rating,
                sportsmanship_rating: row.captain_sportsmanship_rating,
                no_show_count: row.captain_no_show_count,
            },
            field: FieldInfo {
                id: row.field_id,
                sport: row.field_sport,
                address: row.field_address,
                price: row.price,
            },
            slot_id: row.slot_id,
            waitlist_enabled: row.waitlist_enabled,
            is_private: row.is_private,
            invite_code: row.invite_code,
        }
    }
}

#[derive(Debug, FromRow)]
struct MemberRow {
    #[sqlx(flatten)]
    info: PlayerInfo,
    status: PlayerStatus,
}

/// A match locked for update together with its membership rows.
pub(crate) struct LockedMatch {
    pub record: Match,
    pub entries: Vec<MatchPlayer>,
    pub roster: Roster,
}

/// Lock the match row and rebuild its roster. Every membership or status
/// change goes through here, which serializes them per match.
pub(crate) async fn lock_match(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
) -> Result<LockedMatch> {
    let record = sqlx::query_as::<_, Match>(
        r#"
        SELECT match_id, title, slot_id, field_id, captain_id, starts_at, max_players,
               waitlist_enabled, is_private, invite_code, status, created_at
        FROM matches
        WHERE match_id = $1
        FOR UPDATE
        "#,
    )
    .bind(match_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(StorageError::NotFound)?;

    let entries = sqlx::query_as::<_, MatchPlayer>(
        r#"
        SELECT match_id, user_id, status, seat_order, joined_at
        FROM match_players
        WHERE match_id = $1
        ORDER BY seat_order
        "#,
    )
    .bind(match_id)
    .fetch_all(&mut **tx)
    .await?;

    let roster = Roster::from_records(&record, &entries);

    Ok(LockedMatch {
        record,
        entries,
        roster,
    })
}

/// Load the full aggregate on an existing connection or transaction.
pub(crate) async fn load_detail(
    conn: &mut PgConnection,
    match_id: Uuid,
) -> Result<MatchDetailResponse> {
    let summary: MatchSummary = sqlx::query_as::<_, SummaryRow>(&format!(
        "{SUMMARY_SELECT} WHERE m.match_id = $1"
    ))
    .bind(match_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StorageError::NotFound)?
    .into();

    let members = sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT u.user_id AS id, u.full_name, u.photo_url, u.level, u.position,
               u.skill_rating, u.sportsmanship_rating, u.no_show_count, mp.status
        FROM match_players mp
        JOIN users u ON u.user_id = mp.user_id
        WHERE mp.match_id = $1
        ORDER BY mp.seat_order
        "#,
    )
    .bind(match_id)
    .fetch_all(&mut *conn)
    .await?;

    let (players, waitlist): (Vec<MemberRow>, Vec<MemberRow>) = members
        .into_iter()
        .partition(|member| member.status.holds_seat());

    Ok(MatchDetailResponse {
        summary,
        players: players.into_iter().map(|m| m.info).collect(),
        waitlist: waitlist.into_iter().map(|m| m.info).collect(),
    })
}

/// Repository for matches and their rosters
pub struct MatchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Claim the slot and create the match with its captain seated, atomically
    pub async fn create(
        &self,
        captain_id: Uuid,
        req: &CreateMatchRequest,
    ) -> Result<MatchDetailResponse> {
        let mut tx = self.pool.begin().await?;

        let slot = SlotRepository::claim(&mut tx, req.slot_id).await?;

        let invite_code = if req.is_private {
            Some(Self::unused_invite_code(&mut tx).await?)
        } else {
            None
        };

        let match_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO matches (
                title, slot_id, field_id, captain_id, starts_at, max_players,
                waitlist_enabled, is_private, invite_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING match_id
            "#,
        )
        .bind(&req.title)
        .bind(slot.slot_id)
        .bind(slot.field_id)
        .bind(captain_id)
        .bind(slot.start_time)
        .bind(req.max_players)
        .bind(req.waitlist_enabled)
        .bind(req.is_private)
        .bind(&invite_code)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            let constraint = err.constraint().map(str::to_owned);
            match constraint.as_deref() {
                Some("matches_slot_claim_idx") => StorageError::SlotUnavailable,
                Some("matches_invite_code_key") => {
                    StorageError::ConstraintViolation("Invite code collision".to_string())
                }
                _ => err,
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO match_players (match_id, user_id, status)
            VALUES ($1, $2, 'confirmed')
            "#,
        )
        .bind(match_id)
        .bind(captain_id)
        .execute(&mut *tx)
        .await?;

        let detail = load_detail(&mut tx, match_id).await?;
        tx.commit().await?;

        info!(%match_id, %captain_id, slot_id = %slot.slot_id, is_private = req.is_private, "Match created");

        Ok(detail)
    }

    async fn unused_invite_code(tx: &mut Transaction<'_, Postgres>) -> Result<String> {
        for _ in 0..INVITE_CODE_ATTEMPTS {
            let code = invite_code::generate();
            let taken: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM matches WHERE invite_code = $1)")
                    .bind(&code)
                    .fetch_one(&mut **tx)
                    .await?;
            if !taken {
                return Ok(code);
            }
        }

        Err(StorageError::ConstraintViolation(
            "Could not allocate an invite code".to_string(),
        ))
    }

    pub async fn find_detail(&self, match_id: Uuid) -> Result<MatchDetailResponse> {
        let mut conn = self.pool.acquire().await?;
        load_detail(&mut conn, match_id).await
    }

    /// Resolve an invite code. Unknown codes and codes of cancelled matches
    /// are both reported as `NotFound`.
    pub async fn find_by_invite(&self, code: &str) -> Result<MatchDetailResponse> {
        if !invite_code::is_well_formed(code) {
            return Err(StorageError::NotFound);
        }

        let match_id: Uuid = sqlx::query_scalar(
            r#"
            SELECT match_id
            FROM matches
            WHERE invite_code = $1 AND status <> 'cancelled'
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        self.find_detail(match_id).await
    }

    /// Public, active matches ordered by kick-off time
    pub async fn list_active(
        &self,
        params: &PaginationParams,
    ) -> Result<(Vec<MatchSummary>, i64)> {
        let rows = sqlx::query_as::<_, SummaryRow>(&format!(
            r#"{SUMMARY_SELECT}
            WHERE m.status = 'active' AND NOT m.is_private
            ORDER BY m.starts_at ASC, m.match_id
            LIMIT $1 OFFSET $2"#
        ))
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM matches
            WHERE status = 'active' AND NOT is_private
            "#,
        )
        .fetch_one(self.pool)
        .await?;

        Ok((rows.into_iter().map(MatchSummary::from).collect(), total))
    }

    pub async fn join(&self, match_id: Uuid, user_id: Uuid) -> Result<MatchDetailResponse> {
        let mut tx = self.pool.begin().await?;
        let LockedMatch { mut roster, .. } = lock_match(&mut tx, match_id).await?;

        let placement = roster.join(user_id)?;
        let status = match placement {
            Placement::Roster => PlayerStatus::Confirmed,
            Placement::Waitlist => PlayerStatus::Waitlist,
        };

        sqlx::query(
            r#"
            INSERT INTO match_players (match_id, user_id, status)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(match_id)
        .bind(user_id)
        .bind(status)
        .execute(&mut *tx)
        .await?;

        let detail = load_detail(&mut tx, match_id).await?;
        tx.commit().await?;

        info!(%match_id, %user_id, ?placement, "Player joined match");

        Ok(detail)
    }

    /// Remove a member; a freed roster seat is handed to the waitlist head
    /// before the transaction commits.
    pub async fn leave(&self, match_id: Uuid, user_id: Uuid) -> Result<MatchDetailResponse> {
        let mut tx = self.pool.begin().await?;
        let LockedMatch {
            mut roster,
            entries,
            ..
        } = lock_match(&mut tx, match_id).await?;

        let outcome = roster.leave(user_id)?;
        let vacated_seat = entries
            .iter()
            .find(|entry| entry.user_id == user_id)
            .map(|entry| entry.seat_order)
            .ok_or(StorageError::NotMember)?;

        sqlx::query("DELETE FROM match_players WHERE match_id = $1 AND user_id = $2")
            .bind(match_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if let Some(promoted) = outcome.promoted {
            sqlx::query(
                r#"
                UPDATE match_players
                SET status = 'confirmed', seat_order = $3
                WHERE match_id = $1 AND user_id = $2
                "#,
            )
            .bind(match_id)
            .bind(promoted)
            .bind(vacated_seat)
            .execute(&mut *tx)
            .await?;

            debug!(%match_id, %promoted, "Promoted from waitlist");
        }

        let detail = load_detail(&mut tx, match_id).await?;
        tx.commit().await?;

        info!(%match_id, %user_id, left = ?outcome.left, "Player left match");

        Ok(detail)
    }

    pub async fn complete(&self, match_id: Uuid, actor_id: Uuid) -> Result<MatchDetailResponse> {
        let mut tx = self.pool.begin().await?;
        let LockedMatch { mut roster, .. } = lock_match(&mut tx, match_id).await?;

        roster.complete(actor_id)?;
        Self::set_status(&mut tx, match_id, roster.status()).await?;

        let detail = load_detail(&mut tx, match_id).await?;
        tx.commit().await?;

        info!(%match_id, "Match completed");

        Ok(detail)
    }

    /// Cancel the match and hand its slot back to the ledger
    pub async fn cancel(&self, match_id: Uuid, actor_id: Uuid) -> Result<MatchDetailResponse> {
        let mut tx = self.pool.begin().await?;
        let LockedMatch {
            record, mut roster, ..
        } = lock_match(&mut tx, match_id).await?;

        roster.cancel(actor_id)?;
        Self::set_status(&mut tx, match_id, roster.status()).await?;
        SlotRepository::release(&mut tx, record.slot_id).await?;

        let detail = load_detail(&mut tx, match_id).await?;
        tx.commit().await?;

        info!(%match_id, slot_id = %record.slot_id, "Match cancelled, slot released");

        Ok(detail)
    }

    async fn set_status(
        tx: &mut Transaction<'_, Postgres>,
        match_id: Uuid,
        status: MatchStatus,
    ) -> Result<()> {
        sqlx::query("UPDATE matches SET status = $2 WHERE match_id = $1")
            .bind(match_id)
            .bind(status)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
