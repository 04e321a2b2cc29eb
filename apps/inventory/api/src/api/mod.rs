//! API routes
//!
//! Everything here is nested under `/api` by `axum_helpers::create_router`.
//! Only the users routes are reachable without a session.

pub mod health;

use axum::{Router, middleware};
use axum_helpers::{MongoSessionStore, create_session_layer, require_auth};
use domain_catalog::{Brand, Category, MongoReferenceRepository, PackageType, ReferenceService, Vendor};
use domain_product_images::{ImageService, MongoImageRepository};
use domain_products::{CustomsService, MongoCustomsRepository, MongoProductRepository, ProductService};
use domain_users::{MongoUserRepository, UserService, VerificationConfig};
use email::{EmailProvider, TemplateEngine};
use mongodb::Database;
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

/// One router per resource, before session and auth layers are applied.
pub struct DomainRouters {
    pub users: Router,
    pub products: Router,
    pub customs: Router,
    pub images: Router,
    pub brands: Router,
    pub categories: Router,
    pub package_types: Router,
    pub vendors: Router,
}

impl DomainRouters {
    /// Routers backed by the MongoDB repositories.
    pub fn mongo(
        db: &Database,
        mailer: Arc<dyn EmailProvider>,
        templates: TemplateEngine,
        verification: VerificationConfig,
    ) -> Self {
        use domain_catalog::handlers::{brands, categories, package_types, vendors};

        let products = MongoProductRepository::new(db);
        let customs = MongoCustomsRepository::new(db);

        Self {
            users: domain_users::handlers::router(UserService::new(
                MongoUserRepository::new(db),
                mailer,
                templates,
                verification,
            )),
            products: domain_products::handlers::router(ProductService::new(
                products,
                customs.clone(),
            )),
            customs: domain_products::handlers::customs_router(CustomsService::new(customs)),
            images: domain_product_images::handlers::router(ImageService::new(
                MongoImageRepository::new(db),
            )),
            brands: brands::router(ReferenceService::new(
                MongoReferenceRepository::<Brand>::new(db),
            )),
            categories: categories::router(ReferenceService::new(
                MongoReferenceRepository::<Category>::new(db),
            )),
            package_types: package_types::router(ReferenceService::new(
                MongoReferenceRepository::<PackageType>::new(db),
            )),
            vendors: vendors::router(ReferenceService::new(
                MongoReferenceRepository::<Vendor>::new(db),
            )),
        }
    }

    /// Mount every resource at its path, guarding all but `/users`.
    pub fn into_router(self) -> Router {
        Router::new()
            .nest("/users", self.users)
            .nest("/products", guarded(self.products))
            .nest("/productCustoms", guarded(self.customs))
            .nest("/productImages", guarded(self.images))
            .nest("/productBrands", guarded(self.brands))
            .nest("/productCategories", guarded(self.categories))
            .nest("/productPackageTypes", guarded(self.package_types))
            .nest("/productVendors", guarded(self.vendors))
    }
}

fn guarded(router: Router) -> Router {
    router.route_layer(middleware::from_fn(require_auth))
}

/// Create all API routes.
///
/// The session layer wraps the resource routes and keeps sessions in the
/// `sessions` collection of the same database; `/ready` is merged after it
/// so probes never create sessions.
pub fn routes(
    state: &AppState,
    mailer: Arc<dyn EmailProvider>,
    templates: TemplateEngine,
) -> Router {
    let config = &state.config;
    DomainRouters::mongo(&state.db, mailer, templates, config.verification.clone())
        .into_router()
        .layer(create_session_layer(
            MongoSessionStore::new(&state.db),
            &config.session,
            &config.environment,
        ))
        .merge(health::router(state.clone()))
}

/// Create the indexes every collection relies on, including the unique user
/// indexes and the session TTL index.
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoSessionStore::new(db).init_indexes().await?;
    MongoUserRepository::new(db).init_indexes().await?;
    MongoProductRepository::new(db).init_indexes().await?;
    MongoCustomsRepository::new(db).init_indexes().await?;
    MongoImageRepository::new(db).init_indexes().await?;
    MongoReferenceRepository::<Brand>::new(db).init_indexes().await?;
    MongoReferenceRepository::<Category>::new(db).init_indexes().await?;
    MongoReferenceRepository::<PackageType>::new(db).init_indexes().await?;
    MongoReferenceRepository::<Vendor>::new(db).init_indexes().await?;
    info!("MongoDB indexes initialized");
    Ok(())
}
