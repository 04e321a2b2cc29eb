use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use uuid::Uuid;

/// The authenticated caller, placed in request extensions by
/// [`require_auth`](super::require_auth).
///
/// Extracting it on a route without the guard yields 401.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
}

impl AuthUser {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))
    }
}
