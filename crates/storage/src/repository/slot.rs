use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::field::SlotResponse;
use crate::error::{Result, StorageError};
use crate::models::TimeSlot;
use crate::services::schedule::SlotWindow;

/// Repository for the per-field slot ledger
pub struct SlotRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SlotRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert planned windows, skipping any start time the field already has.
    ///
    /// Returns how many slots were actually created.
    pub async fn insert_windows(&self, field_id: Uuid, windows: &[SlotWindow]) -> Result<u64> {
        if windows.is_empty() {
            return Ok(0);
        }

        let starts: Vec<NaiveDateTime> = windows.iter().map(|w| w.start).collect();
        let ends: Vec<NaiveDateTime> = windows.iter().map(|w| w.end).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO time_slots (field_id, start_time, end_time)
            SELECT $1, w.start_time, w.end_time
            FROM UNNEST($2::timestamp[], $3::timestamp[]) AS w(start_time, end_time)
            ON CONFLICT (field_id, start_time) DO NOTHING
            "#,
        )
        .bind(field_id)
        .bind(&starts)
        .bind(&ends)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// All slots of a field starting on `on_date`, earliest first
    pub async fn list_for_day(&self, field_id: Uuid, on_date: NaiveDate) -> Result<Vec<SlotResponse>> {
        let day_start = on_date.and_time(NaiveTime::MIN);
        let day_end = on_date
            .succ_opt()
            .ok_or_else(|| StorageError::InvalidRange("date out of range".to_string()))?
            .and_time(NaiveTime::MIN);

        let slots = sqlx::query_as::<_, SlotResponse>(
            r#"
            SELECT s.slot_id AS id, s.field_id, s.start_time, s.end_time, s.status,
                   COALESCE(s.price_override, f.price_per_hour) AS price
            FROM time_slots s
            JOIN fields f ON f.field_id = s.field_id
            WHERE s.field_id = $1
              AND s.start_time >= $2
              AND s.start_time < $3
            ORDER BY s.start_time ASC
            "#,
        )
        .bind(field_id)
        .bind(day_start)
        .bind(day_end)
        .fetch_all(self.pool)
        .await?;

        Ok(slots)
    }

    /// Flip a slot from available to booked inside the caller's transaction.
    ///
    /// The conditional update is the claim: of two racing transactions only
    /// one sees the row as available.
    pub async fn claim(tx: &mut Transaction<'_, Postgres>, slot_id: Uuid) -> Result<TimeSlot> {
        let claimed = sqlx::query_as::<_, TimeSlot>(
            r#"
            UPDATE time_slots
            SET status = 'booked'
            WHERE slot_id = $1 AND status = 'available'
            RETURNING slot_id, field_id, start_time, end_time, price_override, status
            "#,
        )
        .bind(slot_id)
        .fetch_optional(&mut **tx)
        .await?;

        if let Some(slot) = claimed {
            return Ok(slot);
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM time_slots WHERE slot_id = $1)")
                .bind(slot_id)
                .fetch_one(&mut **tx)
                .await?;

        if exists {
            Err(StorageError::SlotUnavailable)
        } else {
            Err(StorageError::NotFound)
        }
    }

    /// Return a booked slot to the pool. Only match cancellation calls this.
    pub async fn release(tx: &mut Transaction<'_, Postgres>, slot_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE time_slots
            SET status = 'available'
            WHERE slot_id = $1 AND status = 'booked'
            "#,
        )
        .bind(slot_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
