use sqlx::PgPool;
use storage::{
    dto::field::{GenerateScheduleRequest, SlotQuery, SlotResponse},
    error::{Result, StorageError},
    models::Field,
    repository::{field::FieldRepository, slot::SlotRepository},
    services::schedule,
};
use uuid::Uuid;

pub async fn list_fields(pool: &PgPool) -> Result<Vec<Field>> {
    let repo = FieldRepository::new(pool);
    repo.list().await
}

/// Generate the field's slots for a date range on behalf of its venue owner.
///
/// Windows that already exist are skipped, so repeating a request is harmless.
/// Returns the number of slots created.
pub async fn generate_schedule(
    pool: &PgPool,
    field_id: Uuid,
    actor_id: Uuid,
    request: &GenerateScheduleRequest,
) -> Result<u64> {
    let owner_id = FieldRepository::new(pool).find_owner(field_id).await?;
    if owner_id != actor_id {
        return Err(StorageError::NotFieldOwner);
    }

    let windows = schedule::plan_from_request(request)?;
    let created = SlotRepository::new(pool)
        .insert_windows(field_id, &windows)
        .await?;

    tracing::info!(
        %field_id,
        planned = windows.len(),
        created,
        "Schedule generated"
    );

    Ok(created)
}

/// Slots of a field on one day, with their effective price
pub async fn list_slots(
    pool: &PgPool,
    field_id: Uuid,
    query: &SlotQuery,
) -> Result<Vec<SlotResponse>> {
    FieldRepository::new(pool).find_by_id(field_id).await?;

    let repo = SlotRepository::new(pool);
    repo.list_for_day(field_id, query.on_date).await
}
