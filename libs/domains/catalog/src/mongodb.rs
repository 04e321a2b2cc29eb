//! MongoDB implementation of ReferenceRepository

use async_trait::async_trait;
use database::mongodb::{id_filter, owner_filter};
use futures_util::TryStreamExt;
use mongodb::{Collection, Database, IndexModel, bson::doc};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::kinds::ReferenceKind;
use crate::models::ReferenceEntry;
use crate::repository::ReferenceRepository;

/// Stores one reference list in the collection named by `K::COLLECTION`.
pub struct MongoReferenceRepository<K: ReferenceKind> {
    collection: Collection<ReferenceEntry<K>>,
}

impl<K: ReferenceKind> MongoReferenceRepository<K> {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<ReferenceEntry<K>>(K::COLLECTION),
        }
    }

    /// Index owner lookups.
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let index = IndexModel::builder().keys(doc! { "userId": 1 }).build();
        self.collection.create_index(index).await?;
        tracing::debug!(collection = K::COLLECTION, "Indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl<K: ReferenceKind> ReferenceRepository<K> for MongoReferenceRepository<K> {
    #[instrument(skip(self, entry), fields(collection = K::COLLECTION, entry_id = %entry.id))]
    async fn create(&self, entry: ReferenceEntry<K>) -> CatalogResult<ReferenceEntry<K>> {
        self.collection.insert_one(&entry).await?;
        tracing::info!("{} created", K::LABEL);
        Ok(entry)
    }

    #[instrument(skip(self), fields(collection = K::COLLECTION))]
    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<ReferenceEntry<K>>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self), fields(collection = K::COLLECTION))]
    async fn list_by_user(&self, user_id: Uuid) -> CatalogResult<Vec<ReferenceEntry<K>>> {
        let cursor = self
            .collection
            .find(owner_filter(user_id))
            .sort(doc! { "createdAt": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, entry), fields(collection = K::COLLECTION, entry_id = %entry.id))]
    async fn update(&self, entry: ReferenceEntry<K>) -> CatalogResult<ReferenceEntry<K>> {
        let result = self.collection.replace_one(id_filter(entry.id), &entry).await?;
        if result.matched_count == 0 {
            return Err(CatalogError::NotFound(K::LABEL));
        }
        tracing::info!("{} updated", K::LABEL);
        Ok(entry)
    }

    #[instrument(skip(self), fields(collection = K::COLLECTION))]
    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        if result.deleted_count > 0 {
            tracing::info!(entry_id = %id, "{} deleted", K::LABEL);
        }
        Ok(result.deleted_count > 0)
    }
}
