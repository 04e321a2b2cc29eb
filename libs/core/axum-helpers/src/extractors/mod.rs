//! Custom extractors for Axum handlers.
//!
//! All rejections are rendered as `{ "error": ... }` with status 400 so that
//! clients see a single error shape.

pub mod json_body;
pub mod uuid_path;

pub use json_body::JsonBody;
pub use uuid_path::UuidPath;
