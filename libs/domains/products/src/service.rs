//! Product and customs services - business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, CustomsInput, Product, ProductCustoms, ToggleActivation, UpdateProduct,
};
use crate::repository::{CustomsRepository, ProductRepository};

pub(crate) const PRODUCT: &str = "Product";
pub(crate) const CUSTOMS: &str = "Product customs";

/// Product aggregate operations.
///
/// A product owns exactly one customs record, created and deleted alongside it.
pub struct ProductService<P: ProductRepository, C: CustomsRepository> {
    products: Arc<P>,
    customs: Arc<C>,
}

impl<P: ProductRepository, C: CustomsRepository> ProductService<P, C> {
    pub fn new(products: P, customs: C) -> Self {
        Self {
            products: Arc::new(products),
            customs: Arc::new(customs),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, user_id: Uuid) -> ProductResult<Vec<Product>> {
        self.products.list_by_user(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, user_id: Uuid, id: Uuid) -> ProductResult<Product> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(PRODUCT))?;

        if !product.is_owned_by(user_id) {
            tracing::warn!(product_id = %id, "Product requested by non-owner");
            return Err(ProductError::Unauthorized);
        }
        Ok(product)
    }

    /// Create the customs record, then the product that references it.
    ///
    /// There is no transaction: if the product insert fails the customs record
    /// is removed again before the error is returned.
    #[instrument(skip(self, input))]
    pub async fn create_product(
        &self,
        user_id: Uuid,
        mut input: CreateProduct,
    ) -> ProductResult<Product> {
        let (name, refs) = input.check()?;

        let customs_input = input.product_customs.take().unwrap_or_default();
        let customs = self
            .customs
            .create(ProductCustoms::new(user_id, customs_input))
            .await?;

        let product = Product::new(user_id, customs.id, name, input, refs);
        match self.products.create(product).await {
            Ok(product) => {
                tracing::info!(product_id = %product.id, customs_id = %customs.id, "Product created");
                Ok(product)
            }
            Err(err) => {
                if let Err(rollback) = self.customs.delete(customs.id).await {
                    tracing::error!(
                        customs_id = %customs.id,
                        error = %rollback,
                        "Failed to remove orphaned customs record"
                    );
                }
                Err(err)
            }
        }
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateProduct,
    ) -> ProductResult<Product> {
        let mut product = self.get_product(user_id, id).await?;
        product.apply_update(input.check()?);
        self.products.update(product).await
    }

    #[instrument(skip(self, input))]
    pub async fn toggle_activation(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: ToggleActivation,
    ) -> ProductResult<Product> {
        let mut product = self.get_product(user_id, id).await?;
        product.toggle_activation(input.activated);
        tracing::info!(product_id = %id, activated = product.activated, "Product activation set");
        self.products.update(product).await
    }

    /// Delete the product and its customs record; a missing customs record is tolerated.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, user_id: Uuid, id: Uuid) -> ProductResult<()> {
        let product = self.get_product(user_id, id).await?;

        if !self.customs.delete(product.product_customs_id).await? {
            tracing::debug!(
                customs_id = %product.product_customs_id,
                "Customs record already gone"
            );
        }
        if !self.products.delete(id).await? {
            return Err(ProductError::NotFound(PRODUCT));
        }
        Ok(())
    }
}

/// Customs operations exposed directly over HTTP (list, get, update).
pub struct CustomsService<C: CustomsRepository> {
    customs: Arc<C>,
}

impl<C: CustomsRepository> CustomsService<C> {
    pub fn new(customs: C) -> Self {
        Self {
            customs: Arc::new(customs),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_customs(&self, user_id: Uuid) -> ProductResult<Vec<ProductCustoms>> {
        self.customs.list_by_user(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_customs(&self, user_id: Uuid, id: Uuid) -> ProductResult<ProductCustoms> {
        let customs = self
            .customs
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(CUSTOMS))?;

        if !customs.is_owned_by(user_id) {
            return Err(ProductError::Unauthorized);
        }
        Ok(customs)
    }

    #[instrument(skip(self, input))]
    pub async fn update_customs(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: CustomsInput,
    ) -> ProductResult<ProductCustoms> {
        let mut customs = self.get_customs(user_id, id).await?;
        customs.apply_update(input);
        self.customs.update(customs).await
    }
}
