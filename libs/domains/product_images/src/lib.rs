//! Product Images Domain
//!
//! Image files uploaded as multipart form data, stored as BSON binary and
//! returned to clients base64-encoded.
//!
//! ```text
//! Handlers (multipart, 10 MiB limit) → ImageService (ownership) → ImageRepository
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ImageError, ImageResult};
pub use handlers::{ApiDoc, MAX_UPLOAD_BYTES};
pub use models::{ImageResponse, NewImage, ProductImage};
pub use mongodb::MongoImageRepository;
pub use repository::{ImageRepository, InMemoryImageRepository};
pub use service::ImageService;
