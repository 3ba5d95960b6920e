use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(err) => match err {
                DatabaseError::NotFound => StatusCode::NOT_FOUND,
                DatabaseError::Duplicate => StatusCode::CONFLICT,
                DatabaseError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Authorization(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (error_message, details) = match &self {
            AppError::Database(err) => match err {
                DatabaseError::NotFound => ("Resource not found", self.to_string()),
                DatabaseError::Duplicate => ("Resource already exists", self.to_string()),
                DatabaseError::InvalidInput(_) => ("Invalid input data", self.to_string()),
                // Internal detail stays in the server log only
                _ => {
                    tracing::error!("Unexpected database error: {}", err);
                    (
                        "An internal server error occurred",
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Authentication(_) => ("Authentication failed", self.to_string()),
            AppError::Authorization(_) => ("Access denied", self.to_string()),
            AppError::Validation(_) => ("Validation error", self.to_string()),
            AppError::NotFound(_) => ("Resource not found", self.to_string()),
            AppError::Conflict(_) => ("Resource conflict", self.to_string()),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    "An internal server error occurred",
                    "internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "details": details,
            }
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_status_codes() {
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Authentication("no token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Authorization("wrong role".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("class".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("already enrolled".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InternalServerError("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_keep_their_http_meaning() {
        assert_eq!(
            AppError::from(DatabaseError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(DatabaseError::Duplicate).status_code(),
            StatusCode::CONFLICT
        );
    }
}
