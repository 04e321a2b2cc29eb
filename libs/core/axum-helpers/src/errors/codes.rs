//! Type-safe error codes for structured logs.
//!
//! The response body only carries a human-readable message; these codes are
//! attached to every logged error so dashboards can group failures.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidId;
//! assert_eq!(code.as_str(), "INVALID_ID");
//! assert_eq!(code.code(), 1002);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Path parameter is not a well-formed id
    InvalidId,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Missing session, bad credentials or wrong owner
    Unauthorized,

    /// Request conflicts with current resource state (e.g., duplicate username)
    Conflict,

    /// Malformed or incomplete request
    BadRequest,

    /// Multipart body could not be read
    MultipartError,

    // Server errors (5000-5999)
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidId => "INVALID_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Conflict => "CONFLICT",
            Self::BadRequest => "BAD_REQUEST",
            Self::MultipartError => "MULTIPART_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Integer code for logging and monitoring.
    ///
    /// - 1000-1999: client errors
    /// - 5000-5999: server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::Unauthorized => 1006,
            Self::Conflict => 1008,
            Self::BadRequest => 1009,
            Self::MultipartError => 1010,
            Self::InternalError => 5001,
            Self::ServiceUnavailable => 5003,
        }
    }

    /// Default user-facing message, used when the error carries no detail.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidId => "Invalid id",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Not found",
            Self::Unauthorized => "Unauthorized",
            Self::Conflict => "Resource already exists",
            Self::BadRequest => "Bad request",
            Self::MultipartError => "Invalid multipart body",
            Self::InternalError => "Internal server error",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.code() >= 5000
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
