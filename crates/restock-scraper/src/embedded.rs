//! Extraction from the storefront's inline option-selectors script.
//!
//! This is a narrow, versioned parser for one known template: the block that
//! initializes `Shopify.OptionSelectors` carries the variant payload as
//! JavaScript source, so individual fields are pattern-matched out of the
//! raw text and the larger `product: {…}` object is parsed as JSON when
//! present. Absence of the block is a normal outcome, not an error.

use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;

use restock_core::VariantRecord;

/// Marker identifying the option-selectors initialization script.
const OPTION_SELECTORS_MARKER: &str = "new Shopify.OptionSelectors";

/// Fields pattern-matched out of the embedded script. Every field is
/// independent: one missing match never blocks the others.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedFields {
    pub size: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub weight: Option<String>,
    pub quantity: Option<String>,
    pub id: Option<String>,
    /// The richer template exposes gender as the product `type`.
    pub gender: Option<String>,
    /// Parsed `product: {…}` object, when present and well-formed.
    pub product: Option<EmbeddedProduct>,
}

/// The embedded JSON product object.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedProduct {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub variants: Vec<EmbeddedVariant>,
}

/// One entry of the embedded variants list. The template places size in the
/// second option slot.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedVariant {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default)]
    pub weight: Option<i64>,
}

/// Locates the option-selectors script and extracts the embedded fields.
///
/// Returns `None` when no script in the document contains the marker.
#[must_use]
pub fn extract_embedded(document: &Html) -> Option<EmbeddedFields> {
    let script = find_marker_script(document)?;
    Some(extract_from_script(&script))
}

fn find_marker_script(document: &Html) -> Option<String> {
    let selector = Selector::parse("script").expect("valid script selector");
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .find(|text| text.contains(OPTION_SELECTORS_MARKER))
}

/// Pattern-matches the individual fields out of the script text.
fn extract_from_script(script: &str) -> EmbeddedFields {
    EmbeddedFields {
        size: capture_string(script, r#""Size":"(.*?)""#),
        sku: capture_string(script, r#""sku":"(.*?)""#),
        barcode: capture_string(script, r#""barcode":"(.*?)""#),
        weight: capture_string(script, r#""weight":(\d+)"#),
        quantity: capture_string(script, r#""inventory_quantity":(\d+)"#),
        id: capture_string(script, r#""id":(\d+)"#),
        gender: capture_string(script, r#""type":"(.*?)""#),
        product: parse_product_object(script),
    }
}

fn capture_string(script: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).expect("valid field regex");
    re.captures(script)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Parses the `product: {…}` object embedded in the script.
///
/// The capture runs to the last closing brace on the line; in the known
/// template layout the object occupies its own line of the init call, so
/// that is exactly the object. Malformed JSON is recovered locally: the
/// regex-derived scalars stand and the variants list stays empty.
fn parse_product_object(script: &str) -> Option<EmbeddedProduct> {
    let re = Regex::new(r"product:\s*(\{.*\})").expect("valid product regex");
    let raw = re.captures(script)?.get(1)?.as_str();

    match serde_json::from_str::<EmbeddedProduct>(raw) {
        Ok(product) => Some(product),
        Err(e) => {
            tracing::warn!(error = %e, "embedded product object is not valid JSON; falling back to pattern-matched fields");
            None
        }
    }
}

/// Expands the embedded variants list into one [`VariantRecord`] per entry.
///
/// Order is preserved as given by the source; no deduplication, no sorting.
/// Each field defaults independently when the source entry lacks it.
#[must_use]
pub fn expand_variants(product: &EmbeddedProduct) -> Vec<VariantRecord> {
    product
        .variants
        .iter()
        .map(|variant| VariantRecord {
            size: variant.option2.clone(),
            id: variant.id,
            sku: variant.sku.clone(),
            barcode: variant.barcode.clone(),
            quantity: variant.inventory_quantity,
            weight: variant.weight,
        })
        .collect()
}
