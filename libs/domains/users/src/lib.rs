//! Users domain: sign-up with email verification and session login.
//!
//! ```text
//! handlers  → HTTP endpoints, session cookie
//! service   → validation, Argon2, verification mail
//! repository→ UserRepository trait (MongoDB, in-memory)
//! models    → User entity and request/response DTOs
//! ```
//!
//! ```rust,ignore
//! use domain_users::{InMemoryUserRepository, UserService, VerificationConfig, handlers};
//!
//! let service = UserService::new(
//!     InMemoryUserRepository::new(),
//!     Arc::new(MockSmtpProvider::new()),
//!     TemplateEngine::new()?,
//!     VerificationConfig::default(),
//! );
//! let router = handlers::router(service);
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;

pub use config::VerificationConfig;
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{LoginRequest, SignupRequest, User, UserResponse, VerifyEmailQuery};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
