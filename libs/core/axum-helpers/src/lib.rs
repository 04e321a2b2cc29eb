//! # Axum Helpers
//!
//! Shared plumbing for the inventory HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: session-cookie login, the `require_auth` guard and the `AuthUser` extractor
//! - **[`session`]**: tower-sessions layer configuration and the MongoDB session store
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: `{ "error": ... }` responses with logged error codes
//! - **[`extractors`]**: id path and JSON body extractors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(Router::new(), &config).await?;
//! create_production_app(router, &config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod session;

pub use auth::{AuthSession, AuthUser, require_auth};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{JsonBody, UuidPath};

pub use session::{
    MongoSessionStore, SessionConfig, create_session_layer, spawn_expired_session_cleanup,
};
