//! JSON extractor that rejects with the standard error body.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but a malformed body becomes 400 `{ "error": ... }`.
///
/// Required fields are checked by the domain services.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Entry {
        brand: Option<String>,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|JsonBody(e): JsonBody<Entry>| async move { e.brand.unwrap_or_default() }),
        )
    }

    fn json_request(body: &str) -> Request<Body> {
        Request::post("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_well_formed_body_passes() {
        let response = app().oneshot(json_request(r#"{"brand":"Acme"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Acme");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = app().oneshot(json_request("{oops")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!error_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let response = app()
            .oneshot(Request::post("/").body(Body::from("{}")).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
