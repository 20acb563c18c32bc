//! Shared Error Types
//!
//! This module defines error types that are shared between the API layer and
//! any client consuming the wire types in [`crate::shared`].
//!
//! # Error Categories
//!
//! - `ValidationError` - A request field failed validation
//! - `InvalidId` - A path or query identifier is not a valid UUID
//! - `SerializationError` - JSON serialization/deserialization failures
//!
//! # Usage
//!
//! ```rust
//! use vidtube::shared::error::SharedError;
//!
//! let error = SharedError::validation("content", "Comment content required");
//! assert_eq!(error.to_string(), "Comment content required");
//! ```
use thiserror::Error;

/// Shared error types that can occur while validating API input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    ///
    /// The display form is the bare message so it can be returned to clients
    /// verbatim; the field name travels separately in the `errors` list.
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Malformed identifier
    #[error("Invalid {entity} ID")]
    InvalidId {
        /// What the identifier refers to ("video", "comment", ...)
        entity: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid-identifier error
    pub fn invalid_id(entity: impl Into<String>) -> Self {
        Self::InvalidId {
            entity: entity.into(),
        }
    }

    /// Field-level detail for the `errors` list of an error response
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::ValidationError { field, .. } => vec![field.clone()],
            Self::InvalidId { entity } => vec![format!("{entity}Id")],
            Self::SerializationError { message } => vec![message.clone()],
        }
    }
}

/// Helper trait for converting serialization errors
impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error() {
        let error = SharedError::serialization("Invalid JSON");
        match error {
            SharedError::SerializationError { message } => {
                assert_eq!(message, "Invalid JSON");
            }
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_validation_error_displays_bare_message() {
        let error = SharedError::validation("email", "Invalid email format");
        assert_eq!(error.to_string(), "Invalid email format");
        assert_eq!(error.details(), vec!["email".to_string()]);
    }

    #[test]
    fn test_invalid_id_message() {
        let error = SharedError::invalid_id("video");
        assert_eq!(error.to_string(), "Invalid video ID");
        assert_eq!(error.details(), vec!["videoId".to_string()]);
    }

    #[test]
    fn test_from_serde_error() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{ invalid json }");
        let shared_error: SharedError = result.unwrap_err().into();

        match shared_error {
            SharedError::SerializationError { message } => assert!(message.starts_with("JSON error")),
            _ => panic!("Expected SerializationError from serde error"),
        }
    }
}
