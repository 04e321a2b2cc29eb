use axum::response::{IntoResponse, Response};

use super::AppError;

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    AppError::NotFound("Not found".to_string()).into_response()
}
