pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error response.
///
/// ```json
/// { "error": "Brand is required" }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own error enums into this type; the
/// `IntoResponse` impl picks the status, logs with an `error_code` field and
/// renders [`ErrorResponse`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    fn parts(self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::JsonExtractorRejection(e) => {
                (StatusCode::BAD_REQUEST, ErrorCode::JsonExtraction, e.body_text())
            }
            AppError::Multipart(e) => (StatusCode::BAD_REQUEST, ErrorCode::MultipartError, e.body_text()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg),
            AppError::InvalidId(value) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidId,
                format!("Invalid id: {}", value),
            ),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Conflict, msg),
            AppError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError, msg)
            }
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                msg,
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let message = if code.is_server_error() {
            // Details stay in the log; clients get the generic text
            tracing::error!(error_code = code.code(), error = %message, "{}", code);
            code.default_message().to_string()
        } else {
            tracing::info!(error_code = code.code(), error = %message, "{}", code);
            message
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_keeps_message() {
        let response = AppError::BadRequest("Brand is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await.error, "Brand is required");
    }

    #[tokio::test]
    async fn test_invalid_id_message() {
        let response = AppError::InvalidId("abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await.error, "Invalid id: abc");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response =
            AppError::InternalServerError("connection reset by peer".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await.error, "Internal server error");
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::ServiceUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
