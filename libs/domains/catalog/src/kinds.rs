//! Compile-time markers selecting one reference list.

use std::fmt::Debug;

/// Describes where a reference list lives and how its single value is named.
pub trait ReferenceKind: Debug + Clone + PartialEq + Send + Sync + 'static {
    /// MongoDB collection name
    const COLLECTION: &'static str;
    /// JSON/BSON key of the value field
    const FIELD: &'static str;
    /// Human label used in error messages
    const LABEL: &'static str;
    /// OpenAPI schema name
    const SCHEMA_NAME: &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Brand;

impl ReferenceKind for Brand {
    const COLLECTION: &'static str = "productBrands";
    const FIELD: &'static str = "brand";
    const LABEL: &'static str = "Brand";
    const SCHEMA_NAME: &'static str = "ProductBrand";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Category;

impl ReferenceKind for Category {
    const COLLECTION: &'static str = "productCategories";
    const FIELD: &'static str = "category";
    const LABEL: &'static str = "Category";
    const SCHEMA_NAME: &'static str = "ProductCategory";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackageType;

impl ReferenceKind for PackageType {
    const COLLECTION: &'static str = "productPackageTypes";
    const FIELD: &'static str = "packageType";
    const LABEL: &'static str = "Package type";
    const SCHEMA_NAME: &'static str = "ProductPackageType";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vendor;

impl ReferenceKind for Vendor {
    const COLLECTION: &'static str = "productVendors";
    const FIELD: &'static str = "vendor";
    const LABEL: &'static str = "Vendor";
    const SCHEMA_NAME: &'static str = "ProductVendor";
}
