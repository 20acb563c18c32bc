/**
 * Error Conversion
 *
 * Conversions between backend errors, framework rejections and HTTP
 * responses.
 *
 * # Response Format
 *
 * Errors render as:
 * ```json
 * {
 *   "statusCode": 404,
 *   "success": false,
 *   "message": "video not found",
 *   "errors": [],
 *   "data": null
 * }
 * ```
 *
 * Successful [`ApiResponse`] values render with the HTTP status taken from
 * their `statusCode`.
 */

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::backend::error::types::BackendError;
use crate::shared::ApiResponse;

/// Body of an error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
    pub data: Option<()>,
}

impl From<&BackendError> for ErrorBody {
    fn from(err: &BackendError) -> Self {
        Self {
            status_code: err.status_code().as_u16(),
            success: false,
            message: err.message(),
            errors: err.details(),
            data: None,
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self.message());
        }

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected JSON body: {}", rejection.body_text());
        BackendError::handler(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!("Rejected query string: {}", rejection.body_text());
        BackendError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!("Rejected path parameters: {}", rejection.body_text());
        BackendError::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Empty;
    use pretty_assertions::assert_eq;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = BackendError::not_found("video not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "statusCode": 404,
                "success": false,
                "message": "video not found",
                "errors": [],
                "data": null
            })
        );
    }

    #[tokio::test]
    async fn test_success_status_follows_envelope() {
        let response = ApiResponse::created(Empty {}, "Tweet created").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["statusCode"], 201);
        assert_eq!(body["success"], true);
    }
}
