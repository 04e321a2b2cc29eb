use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Product image not found")]
    NotFound,

    #[error("Image belongs to another user")]
    Unauthorized,

    #[error("Image file is required")]
    MissingFile,

    /// The request was not a readable multipart body
    #[error("Invalid upload: {0}")]
    Upload(String),

    #[error(transparent)]
    Multipart(#[from] MultipartError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ImageResult<T> = Result<T, ImageError>;

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::NotFound => AppError::NotFound("Product image not found".to_string()),
            ImageError::Unauthorized => AppError::Unauthorized("Unauthorized".to_string()),
            ImageError::MissingFile => AppError::BadRequest("Image file is required".to_string()),
            ImageError::Upload(msg) => AppError::BadRequest(msg),
            ImageError::Multipart(e) => AppError::Multipart(e),
            ImageError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ImageError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ImageError {
    fn from(err: mongodb::error::Error) -> Self {
        ImageError::Database(err.to_string())
    }
}
