use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::pricing::QuoteError;
use crate::utils::response::error as error_response;

/// Postgres SQLSTATE for a serialization failure under concurrent commits.
const SERIALIZATION_FAILURE: &str = "40001";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Slots full: {0}")]
    SlotsFull(String),

    #[error("Transaction conflict")]
    TransactionConflict,

    #[error("Database error")]
    DatabaseError(#[source] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SlotsFull(_) => StatusCode::CONFLICT,
            AppError::TransactionConflict => StatusCode::CONFLICT,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::SlotsFull(_) => "SLOTS_FULL",
            AppError::TransactionConflict => "TRANSACTION_CONFLICT",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
            AppError::TransactionConflict => {
                warn!("Reservation transaction conflicted and was not retried");
            }
            other => {
                warn!(code = other.code(), message = %other, "Request failed");
            }
        }
    }
}

impl From<QuoteError> for AppError {
    fn from(e: QuoteError) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.code().as_deref() == Some(SERIALIZATION_FAILURE) {
                return AppError::TransactionConflict;
            }
        }
        AppError::DatabaseError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // Internal database details stay out of the API response
        let public_message = match &self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::SlotsFull(msg) => msg.clone(),
            AppError::TransactionConflict => {
                "The reservation could not be completed, please try again.".to_string()
            }
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
        };

        error_response(code, public_message, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_and_conflict_errors_map_to_409() {
        assert_eq!(
            AppError::SlotsFull("Car slots are now full.".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::TransactionConflict.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn quote_errors_surface_as_validation() {
        let err: AppError = QuoteError::InvalidDuration.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
