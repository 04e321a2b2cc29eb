//! Id path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// Extracts the single `{id}` path segment as a [`Uuid`].
///
/// A malformed value is rejected with 400 `Invalid id: <value>`.
///
/// ```ignore
/// async fn get_brand(UuidPath(id): UuidPath) -> String {
///     format!("Brand {}", id)
/// }
///
/// let app = Router::new().route("/{id}", get(get_brand));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Uuid::parse_str(&id)
            .map(UuidPath)
            .map_err(|_| AppError::InvalidId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route("/{id}", get(|UuidPath(id): UuidPath| async move { id.to_string() }))
    }

    #[tokio::test]
    async fn test_valid_uuid() {
        let id = Uuid::now_v7();
        let response = app()
            .oneshot(Request::get(format!("/{}", id)).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_uuid_is_bad_request() {
        let response = app()
            .oneshot(Request::get("/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
