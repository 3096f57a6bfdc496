use std::collections::HashSet;

use uuid::Uuid;

use super::membership::Roster;
use crate::dto::review::SubmitReviewsRequest;
use crate::error::{Result, StorageError};
use crate::models::MatchStatus;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Checks a captain's review submission against the locked match state.
///
/// Nothing is written unless this passes, which keeps the submission
/// all-or-nothing.
pub fn validate_submission(
    roster: &Roster,
    reviewer_id: Uuid,
    already_submitted: bool,
    request: &SubmitReviewsRequest,
) -> Result<()> {
    roster.ensure_captain(reviewer_id)?;

    if roster.status() != MatchStatus::Completed {
        return Err(StorageError::MatchNotCompleted);
    }

    if already_submitted {
        return Err(StorageError::DuplicateReview);
    }

    let mut seen = HashSet::new();
    for review in &request.reviews {
        if !(MIN_RATING..=MAX_RATING).contains(&review.rating) {
            return Err(StorageError::InvalidRating(review.rating));
        }
        ensure_reviewable(roster, review.subject_id)?;
        if !seen.insert((review.subject_id, review.review_type)) {
            return Err(StorageError::Validation(format!(
                "duplicate {:?} review for player {}",
                review.review_type, review.subject_id
            )));
        }
    }

    let mut marked = HashSet::new();
    for no_show in &request.no_shows {
        ensure_reviewable(roster, no_show.subject_id)?;
        if !marked.insert(no_show.subject_id) {
            return Err(StorageError::Validation(format!(
                "player {} marked as no-show twice",
                no_show.subject_id
            )));
        }
    }

    Ok(())
}

fn ensure_reviewable(roster: &Roster, subject_id: Uuid) -> Result<()> {
    if subject_id == roster.captain_id() {
        return Err(StorageError::Validation(
            "the captain cannot review themselves".to_string(),
        ));
    }
    if !roster.players().contains(&subject_id) {
        return Err(StorageError::Validation(format!(
            "player {subject_id} was not on the roster"
        )));
    }
    Ok(())
}
