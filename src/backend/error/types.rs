/**
 * Backend Error Types
 *
 * This module defines the error type every handler returns. Each variant
 * knows its HTTP status and the message a client is allowed to see.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised explicitly by handlers with a status and a client-facing message:
 * - Missing or invalid fields (400)
 * - Missing or invalid credentials (401)
 * - Ownership violations (403)
 * - Unknown resources (404)
 * - Database not configured (503)
 *
 * ## Infrastructure Errors
 *
 * Database, token, hashing and serialization failures. Their details are
 * logged when the response is rendered and never sent to the client, except
 * for the two database cases that are really client errors: a missing row
 * (404) and a unique-constraint violation (409).
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use vidtube::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "All fields are required");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = BackendError::not_found("video not found");
/// assert_eq!(err.message(), "video not found");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Validation error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database query failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JWT encoding failure
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// 503 returned by every data endpoint when no pool is configured
    pub fn database_unavailable() -> Self {
        Self::handler(StatusCode::SERVICE_UNAVAILABLE, "Database not configured")
    }

    /// Whether this is a unique-constraint violation
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db)) => {
                db.code().as_deref() == Some(UNIQUE_VIOLATION)
            }
            _ => false,
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400, or 500 for serialization failures
    /// - `Database` - 404 for a missing row, 409 for a unique violation, else 500
    /// - `Token`, `Password`, `SerializationError` - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } | SharedError::InvalidId { .. } => {
                    StatusCode::BAD_REQUEST
                }
            },
            Self::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::Database(_) if self.is_unique_violation() => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Token(_) | Self::Password(_) | Self::SerializationError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(SharedError::SerializationError { .. }) => {
                "Internal server error".to_string()
            }
            Self::SharedError(err) => err.to_string(),
            Self::Database(sqlx::Error::RowNotFound) => "Resource not found".to_string(),
            Self::Database(_) if self.is_unique_violation() => {
                "Resource already exists".to_string()
            }
            Self::Token(_) => "Something went wrong while generating tokens".to_string(),
            Self::Database(_) | Self::Password(_) | Self::SerializationError(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// Field-level details for the `errors` list
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::SharedError(SharedError::SerializationError { .. }) => Vec::new(),
            Self::SharedError(err) => err.details(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid request");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            BackendError::unauthorized("Unauthorized request").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BackendError::forbidden("You are not the owner of this video").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            BackendError::database_unavailable().status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            BackendError::from(sqlx::Error::RowNotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BackendError::from(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_shared_error() {
        let backend_error: BackendError = SharedError::invalid_id("video").into();
        assert_eq!(backend_error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(backend_error.message(), "Invalid video ID");
        assert_eq!(backend_error.details(), vec!["videoId".to_string()]);
    }

    #[test]
    fn test_infrastructure_details_are_hidden() {
        let error = BackendError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(error.message(), "Internal server error");
        assert!(error.details().is_empty());
        assert!(!error.is_unique_violation());
    }
}
