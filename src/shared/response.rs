//! Success response envelope
//!
//! Every successful API response carries the same outer shape:
//!
//! ```json
//! { "statusCode": 200, "data": { ... }, "message": "...", "success": true }
//! ```
//!
//! The HTTP status of the response always equals `statusCode`.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every successful payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// HTTP status code mirrored in the body
    pub status_code: u16,
    /// Response payload
    pub data: T,
    /// Human-readable outcome
    pub message: String,
    /// `true` when `status_code < 400`
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(status_code: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data,
            message: message.into(),
            success: status_code < 400,
        }
    }

    /// 200 OK
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(200, data, message)
    }

    /// 201 Created
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(201, data, message)
    }
}

/// Payload for responses that carry no data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_follows_status_code() {
        assert!(ApiResponse::ok(Empty {}, "fine").success);
        assert!(ApiResponse::created(1, "made").success);
        assert!(!ApiResponse::new(404, Empty {}, "gone").success);
    }

    #[test]
    fn serializes_camel_case_envelope() {
        let body = serde_json::to_value(ApiResponse::ok(Empty {}, "User logged out")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "statusCode": 200,
                "data": {},
                "message": "User logged out",
                "success": true
            })
        );
    }
}
