use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    /// Carries the entity label, e.g. "Product" or "Product customs"
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Record belongs to another user")]
    Unauthorized,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        ProductError::Validation(msg.into())
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(label) => AppError::NotFound(format!("{} not found", label)),
            ProductError::Unauthorized => AppError::Unauthorized("Unauthorized".to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
