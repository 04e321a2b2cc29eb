use std::marker::PhantomData;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::kinds::ReferenceKind;
use crate::models::{ReferenceEntry, ReferenceInput};
use crate::repository::ReferenceRepository;

/// Business logic for one reference list.
///
/// Every operation is scoped to the calling user: unknown ids are reported as
/// not found and entries owned by someone else as unauthorized.
pub struct ReferenceService<K: ReferenceKind, R: ReferenceRepository<K>> {
    repository: R,
    kind: PhantomData<K>,
}

impl<K: ReferenceKind, R: ReferenceRepository<K>> ReferenceService<K, R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            kind: PhantomData,
        }
    }

    #[instrument(skip(self), fields(kind = K::LABEL))]
    pub async fn list(&self, user_id: Uuid) -> CatalogResult<Vec<ReferenceEntry<K>>> {
        self.repository.list_by_user(user_id).await
    }

    #[instrument(skip(self), fields(kind = K::LABEL))]
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> CatalogResult<ReferenceEntry<K>> {
        let entry = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(K::LABEL))?;

        if !entry.is_owned_by(user_id) {
            tracing::warn!(entry_id = %id, "{} requested by non-owner", K::LABEL);
            return Err(CatalogError::Unauthorized);
        }
        Ok(entry)
    }

    #[instrument(skip(self, input), fields(kind = K::LABEL))]
    pub async fn create(
        &self,
        user_id: Uuid,
        input: ReferenceInput<K>,
    ) -> CatalogResult<ReferenceEntry<K>> {
        let value = input.require_value()?;
        self.repository
            .create(ReferenceEntry::new(user_id, value))
            .await
    }

    #[instrument(skip(self, input), fields(kind = K::LABEL))]
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: ReferenceInput<K>,
    ) -> CatalogResult<ReferenceEntry<K>> {
        let mut entry = self.get(user_id, id).await?;
        entry.set_value(input.require_value()?);
        self.repository.update(entry).await
    }

    #[instrument(skip(self), fields(kind = K::LABEL))]
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> CatalogResult<()> {
        self.get(user_id, id).await?;
        if !self.repository.delete(id).await? {
            return Err(CatalogError::NotFound(K::LABEL));
        }
        Ok(())
    }
}
