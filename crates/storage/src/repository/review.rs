use std::collections::BTreeSet;

use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use super::matches::{LockedMatch, lock_match};
use crate::dto::review::{SubmitReviewsRequest, SubmitReviewsResponse};
use crate::error::{Result, StorageError};
use crate::services::reviews::validate_submission;

/// Repository for post-match reviews and no-show marks
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a captain's reviews and no-show marks for a completed match.
    ///
    /// Runs under the match row lock; either everything is stored, including
    /// the recomputed ratings of every reviewed player, or nothing is.
    pub async fn submit(
        &self,
        match_id: Uuid,
        reviewer_id: Uuid,
        req: &SubmitReviewsRequest,
    ) -> Result<SubmitReviewsResponse> {
        let mut tx = self.pool.begin().await?;
        let LockedMatch { roster, .. } = lock_match(&mut tx, match_id).await?;

        let already_submitted: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM match_review_submissions
                WHERE match_id = $1 AND reviewer_id = $2
            )
            "#,
        )
        .bind(match_id)
        .bind(reviewer_id)
        .fetch_one(&mut *tx)
        .await?;

        validate_submission(&roster, reviewer_id, already_submitted, req)?;

        let recorded = sqlx::query(
            r#"
            INSERT INTO match_review_submissions (match_id, reviewer_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(match_id)
        .bind(reviewer_id)
        .execute(&mut *tx)
        .await?;

        if recorded.rows_affected() == 0 {
            return Err(StorageError::DuplicateReview);
        }

        for review in &req.reviews {
            let rating = i16::try_from(review.rating)
                .map_err(|_| StorageError::InvalidRating(review.rating))?;
            sqlx::query(
                r#"
                INSERT INTO player_reviews (match_id, reviewer_id, subject_id, review_type, rating)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(match_id)
            .bind(reviewer_id)
            .bind(review.subject_id)
            .bind(review.review_type)
            .bind(rating)
            .execute(&mut *tx)
            .await?;
        }

        let mut no_shows_recorded = 0;
        for no_show in &req.no_shows {
            let marked = sqlx::query(
                r#"
                UPDATE match_players
                SET status = 'noshow'
                WHERE match_id = $1 AND user_id = $2 AND status = 'confirmed'
                "#,
            )
            .bind(match_id)
            .bind(no_show.subject_id)
            .execute(&mut *tx)
            .await?;

            if marked.rows_affected() > 0 {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET no_show_count = no_show_count + 1, updated_at = CURRENT_TIMESTAMP
                    WHERE user_id = $1
                    "#,
                )
                .bind(no_show.subject_id)
                .execute(&mut *tx)
                .await?;
                no_shows_recorded += 1;
            }
        }

        let subjects: BTreeSet<Uuid> = req.reviews.iter().map(|r| r.subject_id).collect();
        for subject_id in subjects {
            Self::refresh_ratings(&mut tx, subject_id).await?;
        }

        tx.commit().await?;

        info!(
            %match_id,
            %reviewer_id,
            reviews = req.reviews.len(),
            no_shows = no_shows_recorded,
            "Match reviews stored"
        );

        Ok(SubmitReviewsResponse {
            match_id,
            reviews_recorded: req.reviews.len(),
            no_shows_recorded,
        })
    }

    /// Recompute a player's averages from every review they have received
    async fn refresh_ratings(tx: &mut Transaction<'_, Postgres>, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET skill_rating = COALESCE((
                    SELECT AVG(rating)::float8 FROM player_reviews
                    WHERE subject_id = $1 AND review_type = 'skill'
                ), 0),
                sportsmanship_rating = COALESCE((
                    SELECT AVG(rating)::float8 FROM player_reviews
                    WHERE subject_id = $1 AND review_type = 'sportsmanship'
                ), 0),
                reviews_count = (
                    SELECT COUNT(*)::int FROM player_reviews WHERE subject_id = $1
                ),
                updated_at = CURRENT_TIMESTAMP
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
