//! Error handling module for the WorkOn mock backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and the
//! wire shapes the WorkOn clients expect: `{"error": "..."}` for single
//! failures and `{"errors": ["..."]}` for collected validation failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// `KeyId` header absent or mismatched
    Unauthorized(String),
    /// Request key not found in the store
    NotFound(String),
    /// Field validation failed; every problem is collected so a caller
    /// sees the full list in one round trip
    Validation(Vec<String>),
    /// Malformed request body
    BadRequest(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Validation(errors) => write!(f, "validation failed: {}", errors.join("; ")),
            AppError::BadRequest(msg) => write!(f, "bad request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

/// Single-message error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Collected validation-error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorListBody {
    pub errors: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AppError::Validation(errors) => (status, Json(ErrorListBody { errors })).into_response(),
            AppError::Unauthorized(error)
            | AppError::NotFound(error)
            | AppError::BadRequest(error) => (status, Json(ErrorBody { error })).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Unauthorized("no key".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("RBGA-99".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation(vec!["x".into()]).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_display_joins_validation_errors() {
        let err = AppError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation failed: a; b");
    }
}
