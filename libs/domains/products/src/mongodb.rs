//! MongoDB implementations of ProductRepository and CustomsRepository

use async_trait::async_trait;
use database::mongodb::{id_filter, owner_filter};
use futures_util::TryStreamExt;
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductCustoms};
use crate::repository::{CustomsRepository, ProductRepository};
use crate::service::{CUSTOMS, PRODUCT};

fn owner_index(name: &str) -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "userId": 1, "createdAt": 1 })
        .options(IndexOptions::builder().name(name.to_string()).build())
        .build()
}

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Product>("products"),
        }
    }

    /// Initialize indexes for owner listing and customs lookups
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            owner_index("idx_products_owner"),
            IndexModel::builder()
                .keys(doc! { "productCustomsId": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_products_customs".to_string())
                        .build(),
                )
                .build(),
        ];
        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;
        tracing::info!("Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: Uuid) -> ProductResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(owner_filter(user_id))
            .sort(doc! { "createdAt": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn update(&self, product: Product) -> ProductResult<Product> {
        let result = self
            .collection
            .replace_one(id_filter(product.id), &product)
            .await?;
        if result.matched_count == 0 {
            return Err(ProductError::NotFound(PRODUCT));
        }
        tracing::info!("Product updated successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }
}

/// MongoDB implementation of the CustomsRepository
#[derive(Clone)]
pub struct MongoCustomsRepository {
    collection: Collection<ProductCustoms>,
}

impl MongoCustomsRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<ProductCustoms>("productCustoms"),
        }
    }

    pub async fn init_indexes(&self) -> ProductResult<()> {
        self.collection
            .create_index(owner_index("idx_customs_owner"))
            .await?;
        tracing::info!("Product customs indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl CustomsRepository for MongoCustomsRepository {
    #[instrument(skip(self, customs), fields(customs_id = %customs.id))]
    async fn create(&self, customs: ProductCustoms) -> ProductResult<ProductCustoms> {
        self.collection.insert_one(&customs).await?;
        tracing::info!("Product customs created");
        Ok(customs)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<ProductCustoms>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: Uuid) -> ProductResult<Vec<ProductCustoms>> {
        let cursor = self
            .collection
            .find(owner_filter(user_id))
            .sort(doc! { "createdAt": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, customs), fields(customs_id = %customs.id))]
    async fn update(&self, customs: ProductCustoms) -> ProductResult<ProductCustoms> {
        let result = self
            .collection
            .replace_one(id_filter(customs.id), &customs)
            .await?;
        if result.matched_count == 0 {
            return Err(ProductError::NotFound(CUSTOMS));
        }
        tracing::info!("Product customs updated");
        Ok(customs)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}
