//! Session-cookie authentication.
//!
//! - [`AuthSession`] wraps the tower-sessions handle with login/logout helpers
//! - [`require_auth`] guards routes and injects the request-scoped [`AuthUser`]
//! - [`AuthUser`] is the extractor handlers use to learn who is calling
//!
//! ```ignore
//! use axum::middleware;
//! use axum_helpers::auth::{AuthUser, require_auth};
//!
//! async fn list(user: AuthUser) -> String {
//!     user.id.to_string()
//! }
//!
//! let guarded = Router::new()
//!     .route("/", get(list))
//!     .route_layer(middleware::from_fn(require_auth));
//! ```

pub mod middleware;
pub mod session;
pub mod user;

pub use middleware::require_auth;
pub use session::{AuthSession, SESSION_USER_KEY};
pub use user::AuthUser;
