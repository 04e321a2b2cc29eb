use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuthUser, UuidPath,
    errors::responses::{
        BadRequestIdResponse, BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ImageError, ImageResult};
use crate::models::{DEFAULT_CONTENT_TYPE, IMAGE_FIELD, ImageResponse, NewImage, UploadImageForm};
use crate::repository::ImageRepository;
use crate::service::ImageService;

/// Upload ceiling for this router, below MongoDB's 16 MiB document limit
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// OpenAPI documentation for the Product Images API
#[derive(OpenApi)]
#[openapi(
    paths(list_images, upload_image, get_image),
    components(
        schemas(ImageResponse, UploadImageForm),
        responses(
            BadRequestResponse,
            BadRequestIdResponse,
            NotFoundResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Product Images", description = "Image uploads stored in MongoDB, served as base64")
    )
)]
pub struct ApiDoc;

pub fn router<R: ImageRepository + 'static>(service: ImageService<R>) -> Router {
    Router::new()
        .route("/", get(list_images::<R>).post(upload_image::<R>))
        .route("/{id}", get(get_image::<R>))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(Arc::new(service))
}

/// List the caller's images
#[utoipa::path(
    get,
    path = "",
    tag = "Product Images",
    responses(
        (status = 200, description = "Images owned by the caller", body = Vec<ImageResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_images<R: ImageRepository>(
    State(service): State<Arc<ImageService<R>>>,
    user: AuthUser,
) -> ImageResult<Json<Vec<ImageResponse>>> {
    let images = service.list_images(user.id).await?;
    Ok(Json(images.into_iter().map(ImageResponse::from).collect()))
}

/// Upload an image from the `imageFile` form field
#[utoipa::path(
    post,
    path = "",
    tag = "Product Images",
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = ImageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_image<R: ImageRepository>(
    State(service): State<Arc<ImageService<R>>>,
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ImageResult<impl IntoResponse> {
    let mut multipart = multipart.map_err(|e| ImageError::Upload(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = field.bytes().await?.to_vec();
        upload = Some(NewImage {
            file_name,
            content_type,
            data,
        });
    }

    let image = service.upload_image(user.id, upload).await?;
    Ok((StatusCode::CREATED, Json(ImageResponse::from(image))))
}

/// Get one image
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Product Images",
    params(("id" = Uuid, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Image found", body = ImageResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_image<R: ImageRepository>(
    State(service): State<Arc<ImageService<R>>>,
    user: AuthUser,
    UuidPath(id): UuidPath,
) -> ImageResult<Json<ImageResponse>> {
    Ok(Json(service.get_image(user.id, id).await?.into()))
}
