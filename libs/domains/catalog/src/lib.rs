//! Catalog Domain
//!
//! User-owned reference lists used to classify products: brands, categories,
//! package types and vendors. All four share one implementation that is
//! parameterized by a [`ReferenceKind`] marker.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, one router per kind
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Ownership checks, required field
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB + in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← ReferenceEntry<K>, ReferenceInput<K>
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{Brand, MongoReferenceRepository, ReferenceService, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("inventory");
//!
//! let repository = MongoReferenceRepository::<Brand>::new(&db);
//! let service = ReferenceService::new(repository);
//! let router = handlers::brands::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod kinds;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use kinds::{Brand, Category, PackageType, ReferenceKind, Vendor};
pub use models::{ReferenceEntry, ReferenceInput};
pub use mongodb::MongoReferenceRepository;
pub use repository::{InMemoryReferenceRepository, ReferenceRepository};
pub use service::ReferenceService;
