use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("User is not a member of this match")]
    NotMember,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Rating must be an integer between 1 and 5, got {0}")]
    InvalidRating(i32),

    #[error("Slot is not available")]
    SlotUnavailable,

    #[error("User already joined this match")]
    AlreadyJoined,

    #[error("Match is full")]
    MatchFull,

    #[error("Reviews for this match were already submitted")]
    DuplicateReview,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Only the match captain may perform this action")]
    NotCaptain,

    #[error("The captain cannot leave the match")]
    CaptainCannotLeave,

    #[error("Only the venue owner may manage this venue and its fields")]
    NotFieldOwner,

    #[error("Match is not active")]
    MatchNotActive,

    #[error("Match is not completed")]
    MatchNotCompleted,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Coarse failure classes the transport layer maps to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Authorization,
    NotFound,
    Internal,
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidRange(_) | Self::InvalidRating(_) => {
                ErrorKind::Validation
            }
            Self::SlotUnavailable
            | Self::AlreadyJoined
            | Self::MatchFull
            | Self::DuplicateReview
            | Self::ConstraintViolation(_)
            | Self::MatchNotActive
            | Self::MatchNotCompleted => ErrorKind::Conflict,
            Self::NotCaptain | Self::CaptainCannotLeave | Self::NotFieldOwner => {
                ErrorKind::Authorization
            }
            Self::NotFound | Self::NotMember => ErrorKind::NotFound,
            Self::Database(_) | Self::Migration(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) | Self::Migration(_) => "internal",
            Self::NotFound => "not_found",
            Self::NotMember => "not_a_member",
            Self::Validation(_) => "validation_failed",
            Self::InvalidRange(_) => "invalid_range",
            Self::InvalidRating(_) => "invalid_rating",
            Self::SlotUnavailable => "slot_unavailable",
            Self::AlreadyJoined => "already_joined",
            Self::MatchFull => "match_full",
            Self::DuplicateReview => "duplicate_review",
            Self::ConstraintViolation(_) => "conflict",
            Self::NotCaptain => "not_captain",
            Self::CaptainCannotLeave => "captain_cannot_leave",
            Self::NotFieldOwner => "not_field_owner",
            Self::MatchNotActive => "match_not_active",
            Self::MatchNotCompleted => "match_not_completed",
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    /// Name of the violated constraint, if the database reported one.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            StorageError::Database(sqlx::Error::Database(e)) => e.constraint(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_family() {
        for err in [
            StorageError::SlotUnavailable,
            StorageError::AlreadyJoined,
            StorageError::MatchFull,
            StorageError::DuplicateReview,
            StorageError::ConstraintViolation("User already owns a venue".into()),
        ] {
            assert_eq!(err.kind(), ErrorKind::Conflict, "{err}");
        }
    }

    #[test]
    fn test_authorization_family() {
        assert_eq!(StorageError::NotCaptain.kind(), ErrorKind::Authorization);
        assert_eq!(
            StorageError::CaptainCannotLeave.kind(),
            ErrorKind::Authorization
        );
    }

    #[test]
    fn test_validation_family() {
        assert_eq!(StorageError::InvalidRating(7).kind(), ErrorKind::Validation);
        assert_eq!(
            StorageError::InvalidRange("end before start".into()).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_row_not_found_is_internal() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.code(), "internal");
        assert!(!err.is_unique_violation());
    }
}
