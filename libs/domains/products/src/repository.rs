use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::service::{CUSTOMS, PRODUCT};
use crate::models::{Product, ProductCustoms};

/// Repository trait for Product persistence
///
/// Lookups by id are not owner-filtered; the service layer decides ownership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> ProductResult<Product>;

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Products owned by `user_id`, oldest first
    async fn list_by_user(&self, user_id: Uuid) -> ProductResult<Vec<Product>>;

    /// Replace the stored product with the same id
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Returns whether a product was removed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

/// Repository trait for ProductCustoms persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomsRepository: Send + Sync {
    async fn create(&self, customs: ProductCustoms) -> ProductResult<ProductCustoms>;

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<ProductCustoms>>;

    async fn list_by_user(&self, user_id: Uuid) -> ProductResult<Vec<ProductCustoms>>;

    async fn update(&self, customs: ProductCustoms) -> ProductResult<ProductCustoms>;

    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

/// In-memory product store for tests and local development
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        self.products.write().await.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> ProductResult<Vec<Product>> {
        let mut products: Vec<_> = self
            .products
            .read()
            .await
            .values()
            .filter(|p| p.is_owned_by(user_id))
            .cloned()
            .collect();
        products.sort_by_key(|p| p.created_at);
        Ok(products)
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let slot = products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(PRODUCT))?;
        *slot = product.clone();
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        Ok(self.products.write().await.remove(&id).is_some())
    }
}

/// In-memory customs store; clones share the same map
#[derive(Clone, Default)]
pub struct InMemoryCustomsRepository {
    customs: Arc<RwLock<HashMap<Uuid, ProductCustoms>>>,
}

impl InMemoryCustomsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomsRepository for InMemoryCustomsRepository {
    async fn create(&self, customs: ProductCustoms) -> ProductResult<ProductCustoms> {
        self.customs.write().await.insert(customs.id, customs.clone());
        Ok(customs)
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<ProductCustoms>> {
        Ok(self.customs.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> ProductResult<Vec<ProductCustoms>> {
        let mut customs: Vec<_> = self
            .customs
            .read()
            .await
            .values()
            .filter(|c| c.is_owned_by(user_id))
            .cloned()
            .collect();
        customs.sort_by_key(|c| c.created_at);
        Ok(customs)
    }

    async fn update(&self, customs: ProductCustoms) -> ProductResult<ProductCustoms> {
        let mut stored = self.customs.write().await;
        let slot = stored
            .get_mut(&customs.id)
            .ok_or(ProductError::NotFound(CUSTOMS))?;
        *slot = customs.clone();
        Ok(customs)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        Ok(self.customs.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomsInput;

    #[tokio::test]
    async fn test_update_requires_an_existing_record() {
        let repo = InMemoryCustomsRepository::new();
        let customs = ProductCustoms::new(Uuid::now_v7(), CustomsInput::default());

        let err = repo.update(customs.clone()).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound("Product customs")));

        repo.create(customs.clone()).await.unwrap();
        let mut changed = customs;
        changed.declared_value = "12.50".to_string();
        let updated = repo.update(changed).await.unwrap();
        assert_eq!(updated.declared_value, "12.50");
        assert_eq!(repo.list_by_user(updated.user_id).await.unwrap().len(), 1);
    }
}
