//! HTTP client for the downstream catalog's Admin REST API.
//!
//! Wraps `reqwest` with typed payloads and explicit success/failure — a
//! publish either returns the catalog-assigned product id or a typed error.

use std::time::Duration;

use reqwest::Client;

use restock_core::ProductRecord;

use crate::error::PublishError;
use crate::types::{
    MetafieldPayload, MetafieldRequest, ProductPayload, ProductRequest, ProductResponse,
    PublishedProduct, ShippingPolicy, VariantPayload,
};

/// Product type assigned to everything this storefront relists.
const PRODUCT_TYPE: &str = "Shoes";

/// Client for publishing product records to the catalog.
///
/// Use [`CatalogPublisher::new`] for production or
/// [`CatalogPublisher::with_base_url`] to point at a mock server in tests.
pub struct CatalogPublisher {
    client: Client,
    base_url: String,
    api_key: String,
    password: String,
    default_price: String,
}

impl CatalogPublisher {
    /// Creates a publisher pointed at the store's Admin API.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        store: &str,
        api_key: &str,
        password: &str,
        default_price: &str,
        timeout_secs: u64,
    ) -> Result<Self, PublishError> {
        Self::with_base_url(
            &format!("https://{store}.myshopify.com/admin"),
            api_key,
            password,
            default_price,
            timeout_secs,
        )
    }

    /// Creates a publisher with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        password: &str,
        default_price: &str,
        timeout_secs: u64,
    ) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("restock/0.1 (catalog-relisting)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            password: password.to_owned(),
            default_price: default_price.to_owned(),
        })
    }

    /// Publishes `record` to the catalog and attaches the shipping/returns
    /// policy metafields.
    ///
    /// The operator-supplied `sku_override` wins over the record's SKU
    /// unless it is empty or the literal `"N/A"`.
    ///
    /// # Errors
    ///
    /// - [`PublishError::MissingField`] — the record has no title.
    /// - [`PublishError::UnexpectedStatus`] — non-2xx from the Admin API.
    /// - [`PublishError::Http`] — network or TLS failure.
    /// - [`PublishError::Deserialize`] — unexpected response shape.
    pub async fn publish(
        &self,
        record: &ProductRecord,
        sku_override: Option<&str>,
        policy: &ShippingPolicy,
    ) -> Result<PublishedProduct, PublishError> {
        let payload = self.build_payload(record, sku_override)?;
        let created = self.create_product(payload).await?;

        for metafield in policy_metafields(policy) {
            self.attach_metafield(created.id, metafield).await?;
        }

        tracing::info!(product_id = created.id, "published product to catalog");
        Ok(PublishedProduct { id: created.id })
    }

    fn build_payload(
        &self,
        record: &ProductRecord,
        sku_override: Option<&str>,
    ) -> Result<ProductRequest, PublishError> {
        let title = record
            .title
            .clone()
            .ok_or(PublishError::MissingField { field: "Title" })?;

        let sku = match sku_override {
            Some(sku) if !sku.is_empty() && sku != "N/A" => Some(sku.to_owned()),
            _ => record.sku.clone(),
        };

        // The storefront exposes no long-form description, so body_html is
        // only set when a color line exists to show.
        let body_html = record
            .color
            .as_ref()
            .map(|color| format!("<p>{color}</p>"));

        Ok(ProductRequest {
            product: ProductPayload {
                title,
                body_html,
                vendor: record.brand.clone(),
                product_type: PRODUCT_TYPE.to_owned(),
                variants: vec![VariantPayload {
                    price: self.default_price.clone(),
                    sku,
                    barcode: record.barcode.clone(),
                    weight: record.weight.clone(),
                    inventory_quantity: record.quantity.clone(),
                    size: record.size.clone(),
                }],
            },
        })
    }

    async fn create_product(
        &self,
        payload: ProductRequest,
    ) -> Result<crate::types::CreatedProduct, PublishError> {
        let url = format!("{}/products.json", self.base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(&self.password))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<ProductResponse>(&body).map_err(|e| {
            PublishError::Deserialize {
                context: "create product response".to_owned(),
                source: e,
            }
        })?;

        Ok(parsed.product)
    }

    async fn attach_metafield(
        &self,
        product_id: i64,
        metafield: MetafieldPayload,
    ) -> Result<(), PublishError> {
        let url = format!("{}/products/{product_id}/metafields.json", self.base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(&self.password))
            .json(&MetafieldRequest { metafield })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(())
    }
}

fn policy_metafields(policy: &ShippingPolicy) -> Vec<MetafieldPayload> {
    vec![
        MetafieldPayload {
            namespace: "shipping",
            key: "shipping_weight",
            value: policy.shipping_weight.clone(),
            value_type: "string",
        },
        MetafieldPayload {
            namespace: "shipping",
            key: "shipping_policy",
            value: policy.shipping_policy.clone(),
            value_type: "string",
        },
        MetafieldPayload {
            namespace: "returns",
            key: "returns_policy",
            value: policy.returns_policy.clone(),
            value_type: "string",
        },
    ]
}
