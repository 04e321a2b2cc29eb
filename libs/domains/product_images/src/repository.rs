use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ImageResult;
use crate::models::ProductImage;

/// Repository trait for ProductImage persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn create(&self, image: ProductImage) -> ImageResult<ProductImage>;

    async fn find_by_id(&self, id: Uuid) -> ImageResult<Option<ProductImage>>;

    /// Images owned by `user_id`, oldest first
    async fn list_by_user(&self, user_id: Uuid) -> ImageResult<Vec<ProductImage>>;
}

/// In-memory image store for tests
#[derive(Clone, Default)]
pub struct InMemoryImageRepository {
    images: Arc<RwLock<HashMap<Uuid, ProductImage>>>,
}

impl InMemoryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn create(&self, image: ProductImage) -> ImageResult<ProductImage> {
        self.images.write().await.insert(image.id, image.clone());
        Ok(image)
    }

    async fn find_by_id(&self, id: Uuid) -> ImageResult<Option<ProductImage>> {
        Ok(self.images.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> ImageResult<Vec<ProductImage>> {
        let mut images: Vec<_> = self
            .images
            .read()
            .await
            .values()
            .filter(|i| i.is_owned_by(user_id))
            .cloned()
            .collect();
        images.sort_by_key(|i| i.created_at);
        Ok(images)
    }
}
