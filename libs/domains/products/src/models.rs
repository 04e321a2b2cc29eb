use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};

/// Unit dimensions; any field may be unset until the product is fully described.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Dimensions {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub diameter: Option<f64>,
}

impl Dimensions {
    fn is_complete(&self) -> bool {
        [self.length, self.width, self.height, self.diameter]
            .iter()
            .all(|v| matches!(v, Some(n) if *n != 0.0))
    }
}

/// Outer shipping carton holding `quantity` units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct MasterCaseDimensions {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub quantity: Option<i64>,
}

impl MasterCaseDimensions {
    fn is_complete(&self) -> bool {
        [self.length, self.width, self.height]
            .iter()
            .all(|v| matches!(v, Some(n) if *n != 0.0))
            && matches!(self.quantity, Some(q) if q != 0)
    }
}

/// One marketplace channel's listing for a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingSku {
    pub channel: Option<String>,
    pub listing_sku: Option<String>,
    pub push_inventory: bool,
    pub latency: Option<i64>,
    pub status: Option<String>,
}

/// Product entity - one sellable item owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub product_sku: Option<String>,
    pub brand: Option<String>,
    pub barcode_upc: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Cost of goods sold
    #[schema(value_type = String)]
    pub cogs: Decimal,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub master_case_dimensions: MasterCaseDimensions,
    pub master_case_weight: Option<f64>,
    pub weight: Option<f64>,
    #[schema(value_type = Option<String>)]
    pub domestic_shipping_cost: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub international_shipping_cost: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub duties_and_tariffs: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub pick_and_pack_fee: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub amazon_referral_fee: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub opex: Option<Decimal>,
    pub activated: bool,
    pub product_image_id: Option<Uuid>,
    pub package_type_id: Option<Uuid>,
    pub product_customs_id: Uuid,
    #[serde(default)]
    pub listing_skus: Vec<ListingSku>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product from a validated create payload.
    ///
    /// `activated` defaults to true when not submitted.
    pub fn new(
        user_id: Uuid,
        product_customs_id: Uuid,
        name: String,
        input: CreateProduct,
        refs: ProductRefs,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            product_sku: input.product_sku,
            brand: input.brand,
            barcode_upc: input.barcode_upc,
            category: input.category,
            description: input.description,
            cogs: input.cogs.unwrap_or_default(),
            dimensions: input.dimensions.unwrap_or_default(),
            master_case_dimensions: input.master_case_dimensions.unwrap_or_default(),
            master_case_weight: input.master_case_weight,
            weight: input.weight,
            domestic_shipping_cost: input.domestic_shipping_cost,
            international_shipping_cost: input.international_shipping_cost,
            duties_and_tariffs: input.duties_and_tariffs,
            pick_and_pack_fee: input.pick_and_pack_fee,
            amazon_referral_fee: input.amazon_referral_fee,
            opex: input.opex,
            activated: input.activated.unwrap_or(true),
            product_image_id: refs.product_image_id,
            package_type_id: refs.package_type_id,
            product_customs_id,
            listing_skus: input.listing_skus.unwrap_or_default(),
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Overwrite every scalar field from a checked update.
    ///
    /// The listing SKUs are replaced only when the update carries them.
    pub fn apply_update(&mut self, update: CheckedUpdate) {
        let CheckedUpdate { fields, refs } = update;
        self.name = fields.name.unwrap_or_default();
        self.product_sku = fields.product_sku;
        self.brand = fields.brand;
        self.barcode_upc = fields.barcode_upc;
        self.category = fields.category;
        self.description = fields.description;
        self.cogs = fields.cogs.unwrap_or_default();
        self.dimensions = fields.dimensions.unwrap_or_default();
        self.master_case_dimensions = fields.master_case_dimensions.unwrap_or_default();
        self.master_case_weight = fields.master_case_weight;
        self.weight = fields.weight;
        self.domestic_shipping_cost = fields.domestic_shipping_cost;
        self.international_shipping_cost = fields.international_shipping_cost;
        self.duties_and_tariffs = fields.duties_and_tariffs;
        self.pick_and_pack_fee = fields.pick_and_pack_fee;
        self.amazon_referral_fee = fields.amazon_referral_fee;
        self.opex = fields.opex;
        self.activated = fields.activated.unwrap_or(self.activated);
        self.product_image_id = refs.product_image_id;
        self.package_type_id = refs.package_type_id;
        if let Some(skus) = fields.listing_skus {
            self.listing_skus.clear();
            self.listing_skus.extend(skus);
        }
        self.touch();
    }

    /// Store the inverse of the submitted flag; absent counts as false.
    pub fn toggle_activation(&mut self, submitted: Option<bool>) {
        self.activated = !submitted.unwrap_or(false);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Optional references parsed from their string form.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductRefs {
    pub product_image_id: Option<Uuid>,
    pub package_type_id: Option<Uuid>,
}

impl ProductRefs {
    /// Parse optional ids; absent and empty strings both mean "no reference".
    pub fn parse(product_image_id: Option<&str>, package_type_id: Option<&str>) -> ProductResult<Self> {
        Ok(Self {
            product_image_id: parse_optional_id(product_image_id, "Invalid product image id")?,
            package_type_id: parse_optional_id(package_type_id, "Invalid package type id")?,
        })
    }
}

fn parse_optional_id(raw: Option<&str>, message: &str) -> ProductResult<Option<Uuid>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(|_| ProductError::validation(message)),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// DTO for creating a product together with its customs record
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: Option<String>,
    pub product_sku: Option<String>,
    pub brand: Option<String>,
    pub barcode_upc: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub cogs: Option<Decimal>,
    pub dimensions: Option<Dimensions>,
    pub master_case_dimensions: Option<MasterCaseDimensions>,
    pub master_case_weight: Option<f64>,
    pub weight: Option<f64>,
    #[schema(value_type = Option<String>)]
    pub domestic_shipping_cost: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub international_shipping_cost: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub duties_and_tariffs: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub pick_and_pack_fee: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub amazon_referral_fee: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub opex: Option<Decimal>,
    pub activated: Option<bool>,
    pub product_image_id: Option<String>,
    pub package_type_id: Option<String>,
    pub product_customs: Option<CustomsInput>,
    pub listing_skus: Option<Vec<ListingSku>>,
}

impl CreateProduct {
    /// Check the name and parse references, returning the trimmed name.
    pub fn check(&self) -> ProductResult<(String, ProductRefs)> {
        if is_blank(&self.name) {
            return Err(ProductError::validation("Product name is required"));
        }
        let refs = ProductRefs::parse(
            self.product_image_id.as_deref(),
            self.package_type_id.as_deref(),
        )?;
        Ok((self.name.clone().unwrap_or_default(), refs))
    }
}

/// DTO for a full product update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub product_sku: Option<String>,
    pub brand: Option<String>,
    pub barcode_upc: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub cogs: Option<Decimal>,
    pub dimensions: Option<Dimensions>,
    pub master_case_dimensions: Option<MasterCaseDimensions>,
    pub master_case_weight: Option<f64>,
    pub weight: Option<f64>,
    #[schema(value_type = Option<String>)]
    pub domestic_shipping_cost: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub international_shipping_cost: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub duties_and_tariffs: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub pick_and_pack_fee: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub amazon_referral_fee: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub opex: Option<Decimal>,
    pub activated: Option<bool>,
    pub product_image_id: Option<String>,
    pub package_type_id: Option<String>,
    pub listing_skus: Option<Vec<ListingSku>>,
}

/// An update that passed [`UpdateProduct::check`].
#[derive(Debug, Clone)]
pub struct CheckedUpdate {
    fields: UpdateProduct,
    refs: ProductRefs,
}

impl UpdateProduct {
    /// Require the full field set, naming the first missing field.
    pub fn check(self) -> ProductResult<CheckedUpdate> {
        let required_text = [
            (&self.name, "Product name is required"),
            (&self.product_sku, "Product SKU is required"),
            (&self.brand, "Brand is required"),
            (&self.barcode_upc, "Barcode UPC is required"),
        ];
        if let Some((_, msg)) = required_text.iter().find(|(v, _)| is_blank(v)) {
            return Err(ProductError::validation(*msg));
        }
        if self.cogs.is_none_or(|c| c.is_zero()) {
            return Err(ProductError::validation("COGS is required"));
        }
        if self.weight.is_none_or(|w| w == 0.0) {
            return Err(ProductError::validation("Weight is required"));
        }
        if self.master_case_weight.is_none_or(|w| w == 0.0) {
            return Err(ProductError::validation("Master case weight is required"));
        }
        if !self.dimensions.is_some_and(|d| d.is_complete()) {
            return Err(ProductError::validation(
                "Dimensions (length, width, height, diameter) are required",
            ));
        }
        if !self.master_case_dimensions.is_some_and(|d| d.is_complete()) {
            return Err(ProductError::validation(
                "Master case dimensions (length, width, height, quantity) are required",
            ));
        }
        if self.activated.is_none() {
            return Err(ProductError::validation("Activated is required"));
        }

        let refs = ProductRefs::parse(
            self.product_image_id.as_deref(),
            self.package_type_id.as_deref(),
        )?;
        Ok(CheckedUpdate { fields: self, refs })
    }
}

/// Payload of the activate toggle
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ToggleActivation {
    pub activated: Option<bool>,
}

/// Customs declaration attached to exactly one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCustoms {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub customs_declaration: bool,
    pub item_description: String,
    pub harmonization_code: String,
    pub country_origin: String,
    pub declared_value: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductCustoms {
    /// Absent fields default to `false` / `""`.
    pub fn new(user_id: Uuid, input: CustomsInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            customs_declaration: input.customs_declaration.unwrap_or(false),
            item_description: input.item_description.unwrap_or_default(),
            harmonization_code: input.harmonization_code.unwrap_or_default(),
            country_origin: input.country_origin.unwrap_or_default(),
            declared_value: input.declared_value.unwrap_or_default(),
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Overwrite each supplied field.
    pub fn apply_update(&mut self, input: CustomsInput) {
        if let Some(v) = input.customs_declaration {
            self.customs_declaration = v;
        }
        if let Some(v) = input.item_description {
            self.item_description = v;
        }
        if let Some(v) = input.harmonization_code {
            self.harmonization_code = v;
        }
        if let Some(v) = input.country_origin {
            self.country_origin = v;
        }
        if let Some(v) = input.declared_value {
            self.declared_value = v;
        }
        self.updated_at = Utc::now();
    }
}

/// Customs fields for create (nested in a product) and update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomsInput {
    pub customs_declaration: Option<bool>,
    pub item_description: Option<String>,
    pub harmonization_code: Option<String>,
    pub country_origin: Option<String>,
    pub declared_value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_update() -> serde_json::Value {
        json!({
            "name": "Widget",
            "productSku": "WID-1",
            "brand": "Acme",
            "barcodeUpc": "012345678905",
            "cogs": "4.20",
            "weight": 1.5,
            "masterCaseWeight": 20.0,
            "dimensions": { "length": 1.0, "width": 2.0, "height": 3.0, "diameter": 0.5 },
            "masterCaseDimensions": { "length": 10.0, "width": 20.0, "height": 30.0, "quantity": 12 },
            "activated": false
        })
    }

    fn update_from(value: serde_json::Value) -> UpdateProduct {
        serde_json::from_value(value).unwrap()
    }

    fn validation_message(err: ProductError) -> String {
        match err {
            ProductError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_requires_name() {
        let input = CreateProduct {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(validation_message(input.check().unwrap_err()), "Product name is required");
    }

    #[test]
    fn test_create_treats_empty_ids_as_absent() {
        let input: CreateProduct = serde_json::from_value(json!({
            "name": "Widget",
            "productImageId": "",
            "packageTypeId": ""
        }))
        .unwrap();
        let (_, refs) = input.check().unwrap();
        assert_eq!(refs, ProductRefs::default());
    }

    #[test]
    fn test_create_rejects_malformed_ids() {
        let input: CreateProduct =
            serde_json::from_value(json!({ "name": "Widget", "productImageId": "nope" })).unwrap();
        assert_eq!(validation_message(input.check().unwrap_err()), "Invalid product image id");

        let input: CreateProduct =
            serde_json::from_value(json!({ "name": "Widget", "packageTypeId": "nope" })).unwrap();
        assert_eq!(validation_message(input.check().unwrap_err()), "Invalid package type id");
    }

    #[test]
    fn test_new_product_defaults() {
        let input = CreateProduct {
            name: Some("Widget".to_string()),
            ..Default::default()
        };
        let product = Product::new(
            Uuid::now_v7(),
            Uuid::now_v7(),
            "Widget".to_string(),
            input,
            ProductRefs::default(),
        );
        assert!(product.activated);
        assert!(product.cogs.is_zero());
        assert!(product.listing_skus.is_empty());
    }

    #[test]
    fn test_full_update_passes() {
        assert!(update_from(full_update()).check().is_ok());
    }

    #[test]
    fn test_update_names_each_missing_field() {
        let cases = [
            ("name", "Product name is required"),
            ("productSku", "Product SKU is required"),
            ("brand", "Brand is required"),
            ("barcodeUpc", "Barcode UPC is required"),
            ("cogs", "COGS is required"),
            ("weight", "Weight is required"),
            ("masterCaseWeight", "Master case weight is required"),
            ("activated", "Activated is required"),
        ];
        for (field, expected) in cases {
            let mut body = full_update();
            body.as_object_mut().unwrap().remove(field);
            let err = update_from(body).check().unwrap_err();
            assert_eq!(validation_message(err), expected, "field {field}");
        }
    }

    #[test]
    fn test_update_rejects_zero_dimension() {
        let mut body = full_update();
        body["dimensions"]["diameter"] = json!(0);
        let err = update_from(body).check().unwrap_err();
        assert!(validation_message(err).starts_with("Dimensions"));

        let mut body = full_update();
        body["masterCaseDimensions"].as_object_mut().unwrap().remove("quantity");
        let err = update_from(body).check().unwrap_err();
        assert!(validation_message(err).starts_with("Master case dimensions"));
    }

    #[test]
    fn test_update_replaces_listing_skus_only_when_supplied() {
        let mut product = Product::new(
            Uuid::now_v7(),
            Uuid::now_v7(),
            "Widget".to_string(),
            CreateProduct {
                listing_skus: Some(vec![ListingSku {
                    channel: Some("amazon".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            },
            ProductRefs::default(),
        );

        product.apply_update(update_from(full_update()).check().unwrap());
        assert_eq!(product.listing_skus.len(), 1);
        assert!(!product.activated);

        let mut body = full_update();
        body["listingSkus"] = json!([{ "channel": "ebay" }, { "channel": "walmart" }]);
        product.apply_update(update_from(body).check().unwrap());
        let channels: Vec<_> = product
            .listing_skus
            .iter()
            .filter_map(|s| s.channel.as_deref())
            .collect();
        assert_eq!(channels, vec!["ebay", "walmart"]);
    }

    #[test]
    fn test_toggle_inverts_submitted_value() {
        let mut product = Product::new(
            Uuid::now_v7(),
            Uuid::now_v7(),
            "Widget".to_string(),
            CreateProduct::default(),
            ProductRefs::default(),
        );
        assert!(product.activated);

        product.toggle_activation(Some(false));
        assert!(product.activated);
        product.toggle_activation(Some(true));
        assert!(!product.activated);
        product.toggle_activation(None);
        assert!(product.activated);
    }

    #[test]
    fn test_customs_defaults_and_partial_update() {
        let mut customs = ProductCustoms::new(Uuid::now_v7(), CustomsInput::default());
        assert!(!customs.customs_declaration);
        assert_eq!(customs.item_description, "");
        assert_eq!(customs.declared_value, "");

        customs.apply_update(CustomsInput {
            country_origin: Some("CN".to_string()),
            ..Default::default()
        });
        assert_eq!(customs.country_origin, "CN");
        assert_eq!(customs.harmonization_code, "");
    }

    #[test]
    fn test_product_serializes_camel_case_with_decimal_string() {
        let product = Product::new(
            Uuid::now_v7(),
            Uuid::now_v7(),
            "Widget".to_string(),
            CreateProduct {
                cogs: Some(Decimal::new(420, 2)),
                ..Default::default()
            },
            ProductRefs::default(),
        );
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["cogs"], "4.20");
        assert!(value.get("_id").is_some());
        assert!(value.get("productCustomsId").is_some());
        assert!(value.get("listingSkus").is_some());
    }
}
