//! Admin API payload and response types.

use serde::{Deserialize, Serialize};

/// Operator-configured shipping and returns policy, attached to every
/// published product as metafields. These values are never scraped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingPolicy {
    pub shipping_weight: String,
    pub shipping_policy: String,
    pub returns_policy: String,
}

/// Request envelope for `POST /products.json`.
#[derive(Debug, Serialize)]
pub(crate) struct ProductRequest {
    pub product: ProductPayload,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    pub product_type: String,
    pub variants: Vec<VariantPayload>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VariantPayload {
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Request envelope for `POST /products/{id}/metafields.json`.
#[derive(Debug, Serialize)]
pub(crate) struct MetafieldRequest {
    pub metafield: MetafieldPayload,
}

#[derive(Debug, Serialize)]
pub(crate) struct MetafieldPayload {
    pub namespace: &'static str,
    pub key: &'static str,
    pub value: String,
    pub value_type: &'static str,
}

/// Response envelope from `POST /products.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductResponse {
    pub product: CreatedProduct,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedProduct {
    pub id: i64,
}

/// Outcome of a successful publish.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedProduct {
    /// Catalog-assigned product id.
    pub id: i64,
}
