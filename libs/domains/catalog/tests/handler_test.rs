//! Handler tests for the Catalog domain
//!
//! These run the per-kind routers against the in-memory repository with the
//! caller injected as an `AuthUser` extension, the way the session guard
//! does in the full application.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Extension, Router};
use axum_helpers::AuthUser;
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn brands_app(repo: InMemoryReferenceRepository<Brand>, user_id: Uuid) -> Router {
    handlers::brands::router(ReferenceService::new(repo)).layer(Extension(AuthUser::new(user_id)))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_then_get_brand() {
    let builder = TestDataBuilder::from_test_name("catalog_create_get");
    let repo = InMemoryReferenceRepository::new();
    let app = brands_app(repo, builder.user_id());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "brand": "Acme" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Value = json_body(response.into_body()).await;
    assert_eq!(created["brand"], "Acme");
    assert_eq!(created["userId"], builder.user_id().to_string());
    let id = created["_id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = json_body(response.into_body()).await;
    assert_eq!(fetched["_id"], id.as_str());
}

#[tokio::test]
async fn test_create_without_field_is_bad_request() {
    let builder = TestDataBuilder::from_test_name("catalog_missing_field");
    let app = brands_app(InMemoryReferenceRepository::new(), builder.user_id());

    let response = app
        .oneshot(json_request("POST", "/", json!({ "vendor": "Acme" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Brand is required");
}

#[tokio::test]
async fn test_get_with_malformed_id_is_bad_request() {
    let builder = TestDataBuilder::from_test_name("catalog_bad_id");
    let app = brands_app(InMemoryReferenceRepository::new(), builder.user_id());

    let response = app.oneshot(empty_request("GET", "/not-a-uuid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_and_delete_with_malformed_id_are_bad_requests() {
    let builder = TestDataBuilder::from_test_name("catalog_bad_id_writes");
    let app = brands_app(InMemoryReferenceRepository::new(), builder.user_id());

    let response = app
        .clone()
        .oneshot(json_request("PATCH", "/12345", json!({ "brand": "Acme" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["error"].is_string());

    let response = app.oneshot(empty_request("DELETE", "/12345")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let builder = TestDataBuilder::from_test_name("catalog_missing");
    let app = brands_app(InMemoryReferenceRepository::new(), builder.user_id());

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Brand not found");
}

#[tokio::test]
async fn test_other_users_entry_is_unauthorized() {
    let builder = TestDataBuilder::from_test_name("catalog_wrong_owner");
    let repo = InMemoryReferenceRepository::<Brand>::new();
    let entry = repo
        .create(ReferenceEntry::new(builder.other_user_id(), "Globex"))
        .await
        .unwrap();
    let app = brands_app(repo.clone(), builder.user_id());

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{}", entry.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", entry.id),
            json!({ "brand": "Mine now" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(empty_request("DELETE", &format!("/{}", entry.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(repo.find_by_id(entry.id).await.unwrap().unwrap().value, "Globex");
}

#[tokio::test]
async fn test_update_and_delete_brand() {
    let builder = TestDataBuilder::from_test_name("catalog_update_delete");
    let repo = InMemoryReferenceRepository::<Brand>::new();
    let entry = repo
        .create(ReferenceEntry::new(builder.user_id(), "Acme"))
        .await
        .unwrap();
    let app = brands_app(repo.clone(), builder.user_id());

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", entry.id),
            json!({ "brand": "Acme Corp" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = json_body(response.into_body()).await;
    assert_eq!(updated["brand"], "Acme Corp");

    let response = app
        .oneshot(empty_request("DELETE", &format!("/{}", entry.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(repo.find_by_id(entry.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_only_returns_own_vendors() {
    let builder = TestDataBuilder::from_test_name("catalog_list_vendors");
    let repo = InMemoryReferenceRepository::<Vendor>::new();
    repo.create(ReferenceEntry::new(builder.user_id(), "Supplier A"))
        .await
        .unwrap();
    repo.create(ReferenceEntry::new(builder.other_user_id(), "Supplier B"))
        .await
        .unwrap();
    let app = handlers::vendors::router(ReferenceService::new(repo))
        .layer(Extension(AuthUser::new(builder.user_id())));

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["vendor"], "Supplier A");
}

#[tokio::test]
async fn test_missing_auth_user_is_unauthorized() {
    let app = handlers::categories::router(ReferenceService::new(
        InMemoryReferenceRepository::<Category>::new(),
    ));

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
