//! HTTP handlers for the reference lists.
//!
//! Each kind gets its own module with a router and OpenAPI document so that
//! the generated schemas and tags carry the kind's own name.

/// Generates `$module` with `router`, `ApiDoc` and the five CRUD handlers
/// for the reference kind `$kind`.
macro_rules! reference_api {
    ($module:ident, $kind:ident, $tag:tt) => {
        pub mod $module {
            use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
            use axum_helpers::{
                AuthUser, JsonBody, UuidPath,
                errors::responses::{
                    BadRequestIdResponse, BadRequestResponse, InternalServerErrorResponse,
                    NotFoundResponse, UnauthorizedResponse,
                },
            };
            use std::sync::Arc;
            use utoipa::OpenApi;

            use crate::error::CatalogResult;
            use crate::kinds::$kind;
            use crate::models::{ReferenceEntry, ReferenceInput};
            use crate::repository::ReferenceRepository;
            use crate::service::ReferenceService;

            type Entry = ReferenceEntry<$kind>;
            type Input = ReferenceInput<$kind>;
            type Service<R> = ReferenceService<$kind, R>;

            #[derive(OpenApi)]
            #[openapi(
                paths(list, create, get_one, update, delete),
                components(
                    schemas(Entry, Input),
                    responses(
                        BadRequestResponse,
                        BadRequestIdResponse,
                        NotFoundResponse,
                        UnauthorizedResponse,
                        InternalServerErrorResponse
                    )
                ),
                tags((name = $tag))
            )]
            pub struct ApiDoc;

            pub fn router<R: ReferenceRepository<$kind> + 'static>(service: Service<R>) -> Router {
                Router::new()
                    .route("/", get(list::<R>).post(create::<R>))
                    .route(
                        "/{id}",
                        get(get_one::<R>).patch(update::<R>).delete(delete::<R>),
                    )
                    .with_state(Arc::new(service))
            }

            /// List the caller's entries, oldest first
            #[utoipa::path(
                get,
                path = "",
                tag = $tag,
                responses(
                    (status = 200, description = "Entries owned by the caller", body = Vec<Entry>),
                    (status = 401, response = UnauthorizedResponse),
                    (status = 500, response = InternalServerErrorResponse)
                )
            )]
            async fn list<R: ReferenceRepository<$kind>>(
                State(service): State<Arc<Service<R>>>,
                user: AuthUser,
            ) -> CatalogResult<Json<Vec<Entry>>> {
                Ok(Json(service.list(user.id).await?))
            }

            /// Create an entry owned by the caller
            #[utoipa::path(
                post,
                path = "",
                tag = $tag,
                request_body = Input,
                responses(
                    (status = 201, description = "Entry created", body = Entry),
                    (status = 400, response = BadRequestResponse),
                    (status = 401, response = UnauthorizedResponse),
                    (status = 500, response = InternalServerErrorResponse)
                )
            )]
            async fn create<R: ReferenceRepository<$kind>>(
                State(service): State<Arc<Service<R>>>,
                user: AuthUser,
                JsonBody(input): JsonBody<Input>,
            ) -> CatalogResult<impl IntoResponse> {
                let entry = service.create(user.id, input).await?;
                Ok((StatusCode::CREATED, Json(entry)))
            }

            /// Get one entry
            #[utoipa::path(
                get,
                path = "/{id}",
                tag = $tag,
                params(("id" = Uuid, Path, description = "Entry ID")),
                responses(
                    (status = 200, description = "Entry found", body = Entry),
                    (status = 400, response = BadRequestIdResponse),
                    (status = 401, response = UnauthorizedResponse),
                    (status = 404, response = NotFoundResponse),
                    (status = 500, response = InternalServerErrorResponse)
                )
            )]
            async fn get_one<R: ReferenceRepository<$kind>>(
                State(service): State<Arc<Service<R>>>,
                user: AuthUser,
                UuidPath(id): UuidPath,
            ) -> CatalogResult<Json<Entry>> {
                Ok(Json(service.get(user.id, id).await?))
            }

            /// Replace an entry's value
            #[utoipa::path(
                patch,
                path = "/{id}",
                tag = $tag,
                params(("id" = Uuid, Path, description = "Entry ID")),
                request_body = Input,
                responses(
                    (status = 200, description = "Entry updated", body = Entry),
                    (status = 400, response = BadRequestResponse),
                    (status = 401, response = UnauthorizedResponse),
                    (status = 404, response = NotFoundResponse),
                    (status = 500, response = InternalServerErrorResponse)
                )
            )]
            async fn update<R: ReferenceRepository<$kind>>(
                State(service): State<Arc<Service<R>>>,
                user: AuthUser,
                UuidPath(id): UuidPath,
                JsonBody(input): JsonBody<Input>,
            ) -> CatalogResult<Json<Entry>> {
                Ok(Json(service.update(user.id, id, input).await?))
            }

            /// Delete an entry
            #[utoipa::path(
                delete,
                path = "/{id}",
                tag = $tag,
                params(("id" = Uuid, Path, description = "Entry ID")),
                responses(
                    (status = 204, description = "Entry deleted"),
                    (status = 400, response = BadRequestIdResponse),
                    (status = 401, response = UnauthorizedResponse),
                    (status = 404, response = NotFoundResponse),
                    (status = 500, response = InternalServerErrorResponse)
                )
            )]
            async fn delete<R: ReferenceRepository<$kind>>(
                State(service): State<Arc<Service<R>>>,
                user: AuthUser,
                UuidPath(id): UuidPath,
            ) -> CatalogResult<StatusCode> {
                service.delete(user.id, id).await?;
                Ok(StatusCode::NO_CONTENT)
            }
        }
    };
}

reference_api!(brands, Brand, "Brands");
reference_api!(categories, Category, "Categories");
reference_api!(package_types, PackageType, "Package Types");
reference_api!(vendors, Vendor, "Vendors");
