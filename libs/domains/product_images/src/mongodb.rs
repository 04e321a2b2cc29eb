//! MongoDB implementation of ImageRepository
//!
//! Image bytes are stored as BSON binary (generic subtype). Documents must
//! stay under MongoDB's 16 MiB limit, which the upload router's body limit
//! guarantees.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::mongodb::{id_filter, owner_filter};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Binary, doc, spec::BinarySubtype},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ImageResult;
use crate::models::ProductImage;
use crate::repository::ImageRepository;

/// Stored shape of a [`ProductImage`]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageDocument {
    #[serde(rename = "_id", alias = "id")]
    id: Uuid,
    file_name: String,
    data: Binary,
    content_type: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductImage> for ImageDocument {
    fn from(image: ProductImage) -> Self {
        Self {
            id: image.id,
            file_name: image.file_name,
            data: Binary {
                subtype: BinarySubtype::Generic,
                bytes: image.data,
            },
            content_type: image.content_type,
            user_id: image.user_id,
            created_at: image.created_at,
            updated_at: image.updated_at,
        }
    }
}

impl From<ImageDocument> for ProductImage {
    fn from(doc: ImageDocument) -> Self {
        Self {
            id: doc.id,
            file_name: doc.file_name,
            data: doc.data.bytes,
            content_type: doc.content_type,
            user_id: doc.user_id,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// MongoDB implementation of the ImageRepository
pub struct MongoImageRepository {
    collection: Collection<ImageDocument>,
}

impl MongoImageRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<ImageDocument>("productImages"),
        }
    }

    pub async fn init_indexes(&self) -> ImageResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "userId": 1, "createdAt": 1 })
            .build();
        self.collection.create_index(index).await?;
        tracing::info!("Product image indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl ImageRepository for MongoImageRepository {
    #[instrument(skip(self, image), fields(image_id = %image.id, size = image.data.len()))]
    async fn create(&self, image: ProductImage) -> ImageResult<ProductImage> {
        let document = ImageDocument::from(image.clone());
        self.collection.insert_one(&document).await?;
        tracing::info!("Product image stored");
        Ok(image)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ImageResult<Option<ProductImage>> {
        Ok(self
            .collection
            .find_one(id_filter(id))
            .await?
            .map(ProductImage::from))
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: Uuid) -> ImageResult<Vec<ProductImage>> {
        let cursor = self
            .collection
            .find(owner_filter(user_id))
            .sort(doc! { "createdAt": 1 })
            .await?;
        let documents: Vec<ImageDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(ProductImage::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewImage;
    use mongodb::bson::to_raw_document_buf;
    use test_utils::{TestDataBuilder, TestMongo};

    #[test]
    fn test_filters_match_stored_image() {
        let builder = TestDataBuilder::from_test_name("image_filter_encoding");
        let image = ProductImage::new(
            builder.user_id(),
            NewImage {
                file_name: "logo.png".to_string(),
                content_type: "image/png".to_string(),
                data: vec![0x89, 0x50, 0x4e, 0x47],
            },
        );
        let document = ImageDocument::from(image.clone());

        let stored = to_raw_document_buf(&document).unwrap().to_document().unwrap();
        assert_eq!(stored.get("_id"), id_filter(image.id).get("_id"));
        assert_eq!(stored.get("userId"), owner_filter(builder.user_id()).get("userId"));
        assert_eq!(stored.get_binary_generic("data").unwrap(), &image.data);
    }

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_mongo_image_bytes_survive_round_trip() {
        let mongo = TestMongo::new().await;
        let repo = MongoImageRepository::new(&mongo.database());
        repo.init_indexes().await.unwrap();
        let builder = TestDataBuilder::from_test_name("mongo_image_round_trip");

        let bytes: Vec<u8> = (0..=255).collect();
        let image = repo
            .create(ProductImage::new(
                builder.user_id(),
                NewImage {
                    file_name: "all-bytes.bin".to_string(),
                    content_type: "application/octet-stream".to_string(),
                    data: bytes.clone(),
                },
            ))
            .await
            .unwrap();

        let found = repo.find_by_id(image.id).await.unwrap().unwrap();
        assert_eq!(found.data, bytes);
        assert_eq!(repo.list_by_user(builder.user_id()).await.unwrap().len(), 1);
    }
}
