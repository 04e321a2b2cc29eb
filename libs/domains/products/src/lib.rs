//! Products Domain
//!
//! Products owned by a user, each paired with exactly one customs record.
//! Customs records are created and deleted together with their product but
//! can be read and edited on their own.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (products + customs routers)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Ownership checks, validation, customs rollback
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + MongoDB + in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers, CustomsService, MongoCustomsRepository, MongoProductRepository, ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("inventory");
//!
//! let customs = MongoCustomsRepository::new(&db);
//! let products = ProductService::new(MongoProductRepository::new(&db), customs.clone());
//!
//! let product_routes = handlers::router(products);
//! let customs_routes = handlers::customs_router(CustomsService::new(customs));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::{ApiDoc, CustomsApiDoc};
pub use models::{
    CreateProduct, CustomsInput, Dimensions, ListingSku, MasterCaseDimensions, Product,
    ProductCustoms, ToggleActivation, UpdateProduct,
};
pub use mongodb::{MongoCustomsRepository, MongoProductRepository};
pub use repository::{
    CustomsRepository, InMemoryCustomsRepository, InMemoryProductRepository, ProductRepository,
};
pub use service::{CustomsService, ProductService};
