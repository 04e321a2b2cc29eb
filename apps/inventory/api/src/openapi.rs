//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "Business inventory: products, customs, images and reference lists, scoped per user",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/users", api = domain_users::ApiDoc),
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/productCustoms", api = domain_products::CustomsApiDoc),
        (path = "/api/productImages", api = domain_product_images::ApiDoc),
        (path = "/api/productBrands", api = domain_catalog::handlers::brands::ApiDoc),
        (path = "/api/productCategories", api = domain_catalog::handlers::categories::ApiDoc),
        (path = "/api/productPackageTypes", api = domain_catalog::handlers::package_types::ApiDoc),
        (path = "/api/productVendors", api = domain_catalog::handlers::vendors::ApiDoc)
    )
)]
pub struct ApiDoc;
