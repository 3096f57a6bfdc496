use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::field::{CreateFieldRequest, UpdateFieldRequest};
use crate::error::{Result, StorageError};
use crate::models::Field;

const FIELD_COLUMNS: &str = "field_id, venue_id, sport, address, price_per_hour, description, amenities, created_at";

pub struct FieldRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FieldRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Field>> {
        let fields = sqlx::query_as::<_, Field>(&format!(
            "SELECT {FIELD_COLUMNS} FROM fields ORDER BY sport, address"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(fields)
    }

    pub async fn list_for_venues(&self, venue_ids: &[Uuid]) -> Result<Vec<Field>> {
        let fields = sqlx::query_as::<_, Field>(&format!(
            "SELECT {FIELD_COLUMNS} FROM fields WHERE venue_id = ANY($1) ORDER BY created_at"
        ))
        .bind(venue_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(fields)
    }

    pub async fn find_by_id(&self, field_id: Uuid) -> Result<Field> {
        sqlx::query_as::<_, Field>(&format!(
            "SELECT {FIELD_COLUMNS} FROM fields WHERE field_id = $1"
        ))
        .bind(field_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Owner of the venue the field belongs to
    pub async fn find_owner(&self, field_id: Uuid) -> Result<Uuid> {
        sqlx::query_scalar(
            r#"
            SELECT v.owner_id
            FROM fields f
            JOIN venues v ON v.venue_id = f.venue_id
            WHERE f.field_id = $1
            "#,
        )
        .bind(field_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, venue_id: Uuid, req: &CreateFieldRequest) -> Result<Field> {
        let field = sqlx::query_as::<_, Field>(&format!(
            r#"
            INSERT INTO fields (venue_id, sport, address, price_per_hour, description, amenities)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {FIELD_COLUMNS}
            "#
        ))
        .bind(venue_id)
        .bind(&req.sport)
        .bind(&req.address)
        .bind(req.price_per_hour)
        .bind(&req.description)
        .bind(&req.amenities)
        .fetch_one(self.pool)
        .await?;

        Ok(field)
    }

    /// Apply the provided field attributes on behalf of the venue owner.
    ///
    /// Fails with `NotFieldOwner` when `actor_id` does not own the field's venue.
    pub async fn update(
        &self,
        field_id: Uuid,
        actor_id: Uuid,
        req: &UpdateFieldRequest,
    ) -> Result<Field> {
        let updated = sqlx::query_as::<_, Field>(&format!(
            r#"
            UPDATE fields
            SET sport = COALESCE($3, sport),
                address = COALESCE($4, address),
                price_per_hour = COALESCE($5, price_per_hour),
                description = COALESCE($6, description),
                amenities = COALESCE($7, amenities)
            WHERE field_id = $1
              AND venue_id IN (SELECT venue_id FROM venues WHERE owner_id = $2)
            RETURNING {FIELD_COLUMNS}
            "#
        ))
        .bind(field_id)
        .bind(actor_id)
        .bind(&req.sport)
        .bind(&req.address)
        .bind(req.price_per_hour)
        .bind(&req.description)
        .bind(&req.amenities)
        .fetch_optional(self.pool)
        .await?;

        match updated {
            Some(field) => Ok(field),
            None => {
                self.find_by_id(field_id).await?;
                Err(StorageError::NotFieldOwner)
            }
        }
    }
}
