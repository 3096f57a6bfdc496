use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::{ErrorKind, StorageError};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(e) => match e.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Authorization => StatusCode::FORBIDDEN,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.code(),
            Self::Validation(_) | Self::BadRequest(_) => "validation_failed",
            Self::Unauthorized => "unauthorized",
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let code = self.code();

        let body = match &self {
            Self::Storage(e) if e.kind() == ErrorKind::Internal => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred",
                    "code": code
                })
            }
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found",
                    "code": code
                })
            }
            Self::Storage(e) => {
                json!({
                    "error": e.to_string(),
                    "code": code
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "code": code,
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg,
                    "code": code
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized",
                    "code": code
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_status() {
        let cases = [
            (StorageError::InvalidRating(6), StatusCode::BAD_REQUEST),
            (
                StorageError::InvalidRange("end_time must be after start_time".into()),
                StatusCode::BAD_REQUEST,
            ),
            (StorageError::SlotUnavailable, StatusCode::CONFLICT),
            (StorageError::AlreadyJoined, StatusCode::CONFLICT),
            (StorageError::MatchFull, StatusCode::CONFLICT),
            (StorageError::DuplicateReview, StatusCode::CONFLICT),
            (StorageError::MatchNotActive, StatusCode::CONFLICT),
            (StorageError::MatchNotCompleted, StatusCode::CONFLICT),
            (StorageError::NotCaptain, StatusCode::FORBIDDEN),
            (StorageError::CaptainCannotLeave, StatusCode::FORBIDDEN),
            (StorageError::NotFieldOwner, StatusCode::FORBIDDEN),
            (StorageError::NotFound, StatusCode::NOT_FOUND),
            (StorageError::NotMember, StatusCode::NOT_FOUND),
            (
                StorageError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = WebError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_unauthorized() {
        let error = WebError::Unauthorized;
        assert_eq!(error.code(), "unauthorized");
        assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_storage_code_is_forwarded() {
        let error = WebError::from(StorageError::MatchFull);
        assert_eq!(error.code(), "match_full");
    }
}
