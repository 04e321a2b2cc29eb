use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    AuthUser, JsonBody, UuidPath,
    errors::responses::{
        BadRequestIdResponse, BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, CustomsInput, Dimensions, ListingSku, MasterCaseDimensions, Product,
    ProductCustoms, ToggleActivation, UpdateProduct,
};
use crate::repository::{CustomsRepository, ProductRepository};
use crate::service::{CustomsService, ProductService};

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        toggle_activation,
    ),
    components(
        schemas(
            Product,
            CreateProduct,
            UpdateProduct,
            ToggleActivation,
            Dimensions,
            MasterCaseDimensions,
            ListingSku,
            CustomsInput
        ),
        responses(
            BadRequestResponse,
            BadRequestIdResponse,
            NotFoundResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management with embedded listing SKUs")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for the Product Customs API
#[derive(OpenApi)]
#[openapi(
    paths(list_customs, get_customs, update_customs),
    components(schemas(ProductCustoms, CustomsInput)),
    tags(
        (name = "Product Customs", description = "Customs declarations, one per product")
    )
)]
pub struct CustomsApiDoc;

type SharedProducts<P, C> = State<Arc<ProductService<P, C>>>;
type SharedCustoms<C> = State<Arc<CustomsService<C>>>;

/// Create the products router with all HTTP endpoints
pub fn router<P, C>(service: ProductService<P, C>) -> Router
where
    P: ProductRepository + 'static,
    C: CustomsRepository + 'static,
{
    Router::new()
        .route("/", get(list_products::<P, C>).post(create_product::<P, C>))
        .route(
            "/{id}",
            get(get_product::<P, C>)
                .patch(update_product::<P, C>)
                .delete(delete_product::<P, C>),
        )
        .route("/{id}/activate", patch(toggle_activation::<P, C>))
        .with_state(Arc::new(service))
}

/// Create the customs router; customs are created and deleted with their product
pub fn customs_router<C: CustomsRepository + 'static>(service: CustomsService<C>) -> Router {
    Router::new()
        .route("/", get(list_customs::<C>))
        .route("/{id}", get(get_customs::<C>).patch(update_customs::<C>))
        .with_state(Arc::new(service))
}

/// List the caller's products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "Products owned by the caller", body = Vec<Product>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P: ProductRepository, C: CustomsRepository>(
    State(service): SharedProducts<P, C>,
    user: AuthUser,
) -> ProductResult<Json<Vec<Product>>> {
    Ok(Json(service.list_products(user.id).await?))
}

/// Create a product and its customs record
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, C: CustomsRepository>(
    State(service): SharedProducts<P, C>,
    user: AuthUser,
    JsonBody(input): JsonBody<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(user.id, input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P: ProductRepository, C: CustomsRepository>(
    State(service): SharedProducts<P, C>,
    user: AuthUser,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    Ok(Json(service.get_product(user.id, id).await?))
}

/// Replace every product field; listing SKUs are replaced when supplied
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, C: CustomsRepository>(
    State(service): SharedProducts<P, C>,
    user: AuthUser,
    UuidPath(id): UuidPath,
    JsonBody(input): JsonBody<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    Ok(Json(service.update_product(user.id, id, input).await?))
}

/// Delete a product together with its customs record
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository, C: CustomsRepository>(
    State(service): SharedProducts<P, C>,
    user: AuthUser,
    UuidPath(id): UuidPath,
) -> ProductResult<StatusCode> {
    service.delete_product(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Set `activated` to the inverse of the submitted value
#[utoipa::path(
    patch,
    path = "/{id}/activate",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ToggleActivation,
    responses(
        (status = 200, description = "Activation updated", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn toggle_activation<P: ProductRepository, C: CustomsRepository>(
    State(service): SharedProducts<P, C>,
    user: AuthUser,
    UuidPath(id): UuidPath,
    JsonBody(input): JsonBody<ToggleActivation>,
) -> ProductResult<Json<Product>> {
    Ok(Json(service.toggle_activation(user.id, id, input).await?))
}

/// List the caller's customs records
#[utoipa::path(
    get,
    path = "",
    tag = "Product Customs",
    responses(
        (status = 200, description = "Customs records owned by the caller", body = Vec<ProductCustoms>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_customs<C: CustomsRepository>(
    State(service): SharedCustoms<C>,
    user: AuthUser,
) -> ProductResult<Json<Vec<ProductCustoms>>> {
    Ok(Json(service.list_customs(user.id).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Product Customs",
    params(("id" = Uuid, Path, description = "Customs record ID")),
    responses(
        (status = 200, description = "Customs record found", body = ProductCustoms),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_customs<C: CustomsRepository>(
    State(service): SharedCustoms<C>,
    user: AuthUser,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductCustoms>> {
    Ok(Json(service.get_customs(user.id, id).await?))
}

/// Overwrite the supplied customs fields
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Product Customs",
    params(("id" = Uuid, Path, description = "Customs record ID")),
    request_body = CustomsInput,
    responses(
        (status = 200, description = "Customs record updated", body = ProductCustoms),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_customs<C: CustomsRepository>(
    State(service): SharedCustoms<C>,
    user: AuthUser,
    UuidPath(id): UuidPath,
    JsonBody(input): JsonBody<CustomsInput>,
) -> ProductResult<Json<ProductCustoms>> {
    Ok(Json(service.update_customs(user.id, id, input).await?))
}
