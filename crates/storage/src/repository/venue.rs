use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::venue::{CreateVenueRequest, UpdateVenueRequest};
use crate::error::{Result, StorageError};
use crate::models::Venue;

pub struct VenueRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, params: &PaginationParams) -> Result<(Vec<Venue>, i64)> {
        let venues = sqlx::query_as::<_, Venue>(
            r#"
            SELECT venue_id, owner_id, title, description, phone_number, created_at
            FROM venues
            ORDER BY title, venue_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM venues")
            .fetch_one(self.pool)
            .await?;

        Ok((venues, total))
    }

    pub async fn find_by_id(&self, venue_id: Uuid) -> Result<Venue> {
        sqlx::query_as::<_, Venue>(
            r#"
            SELECT venue_id, owner_id, title, description, phone_number, created_at
            FROM venues
            WHERE venue_id = $1
            "#,
        )
        .bind(venue_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Create the owner's venue profile; each user may own at most one
    pub async fn create(&self, owner_id: Uuid, req: &CreateVenueRequest) -> Result<Venue> {
        sqlx::query_as::<_, Venue>(
            r#"
            INSERT INTO venues (owner_id, title, description, phone_number)
            VALUES ($1, $2, $3, $4)
            RETURNING venue_id, owner_id, title, description, phone_number, created_at
            "#,
        )
        .bind(owner_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.phone_number)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_unique_violation() {
                return StorageError::ConstraintViolation(
                    "User already owns a venue".to_string(),
                );
            }
            err
        })
    }

    /// Update the venue profile; only its owner may do so
    pub async fn update(
        &self,
        venue_id: Uuid,
        actor_id: Uuid,
        req: &UpdateVenueRequest,
    ) -> Result<Venue> {
        let updated = sqlx::query_as::<_, Venue>(
            r#"
            UPDATE venues
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                phone_number = COALESCE($5, phone_number)
            WHERE venue_id = $1 AND owner_id = $2
            RETURNING venue_id, owner_id, title, description, phone_number, created_at
            "#,
        )
        .bind(venue_id)
        .bind(actor_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.phone_number)
        .fetch_optional(self.pool)
        .await?;

        match updated {
            Some(venue) => Ok(venue),
            None => {
                self.find_by_id(venue_id).await?;
                Err(StorageError::NotFieldOwner)
            }
        }
    }
}
