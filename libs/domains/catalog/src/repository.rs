use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::kinds::ReferenceKind;
use crate::models::ReferenceEntry;

/// Persistence for one reference list.
///
/// Lookups by id are not owner-filtered; ownership is decided by the service
/// so that "missing" and "someone else's" stay distinguishable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRepository<K: ReferenceKind>: Send + Sync {
    async fn create(&self, entry: ReferenceEntry<K>) -> CatalogResult<ReferenceEntry<K>>;

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<ReferenceEntry<K>>>;

    /// Entries owned by `user_id`, oldest first
    async fn list_by_user(&self, user_id: Uuid) -> CatalogResult<Vec<ReferenceEntry<K>>>;

    /// Replace the stored entry with the same id
    async fn update(&self, entry: ReferenceEntry<K>) -> CatalogResult<ReferenceEntry<K>>;

    /// Returns whether an entry was removed
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// In-memory store for tests and local development.
pub struct InMemoryReferenceRepository<K: ReferenceKind> {
    entries: Arc<RwLock<HashMap<Uuid, ReferenceEntry<K>>>>,
}

impl<K: ReferenceKind> InMemoryReferenceRepository<K> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<K: ReferenceKind> Default for InMemoryReferenceRepository<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ReferenceKind> Clone for InMemoryReferenceRepository<K> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

#[async_trait]
impl<K: ReferenceKind> ReferenceRepository<K> for InMemoryReferenceRepository<K> {
    async fn create(&self, entry: ReferenceEntry<K>) -> CatalogResult<ReferenceEntry<K>> {
        self.entries.write().await.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<ReferenceEntry<K>>> {
        Ok(self.entries.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> CatalogResult<Vec<ReferenceEntry<K>>> {
        let mut entries: Vec<_> = self
            .entries
            .read()
            .await
            .values()
            .filter(|e| e.is_owned_by(user_id))
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.created_at);
        Ok(entries)
    }

    async fn update(&self, entry: ReferenceEntry<K>) -> CatalogResult<ReferenceEntry<K>> {
        let mut entries = self.entries.write().await;
        let slot = entries
            .get_mut(&entry.id)
            .ok_or(CatalogError::NotFound(K::LABEL))?;
        *slot = entry.clone();
        Ok(entry)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.entries.write().await.remove(&id).is_some())
    }
}
