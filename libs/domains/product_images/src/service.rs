use tracing::instrument;
use uuid::Uuid;

use crate::error::{ImageError, ImageResult};
use crate::models::{NewImage, ProductImage};
use crate::repository::ImageRepository;

/// Owner-scoped access to uploaded product images
pub struct ImageService<R: ImageRepository> {
    repository: R,
}

impl<R: ImageRepository> ImageService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list_images(&self, user_id: Uuid) -> ImageResult<Vec<ProductImage>> {
        self.repository.list_by_user(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_image(&self, user_id: Uuid, id: Uuid) -> ImageResult<ProductImage> {
        let image = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ImageError::NotFound)?;

        if !image.is_owned_by(user_id) {
            return Err(ImageError::Unauthorized);
        }
        Ok(image)
    }

    /// Store the uploaded file; `None` means the form had no `imageFile` field.
    #[instrument(skip(self, upload))]
    pub async fn upload_image(
        &self,
        user_id: Uuid,
        upload: Option<NewImage>,
    ) -> ImageResult<ProductImage> {
        let upload = upload.ok_or(ImageError::MissingFile)?;
        let image = self.repository.create(ProductImage::new(user_id, upload)).await?;
        tracing::info!(image_id = %image.id, file_name = %image.file_name, "Product image uploaded");
        Ok(image)
    }
}
