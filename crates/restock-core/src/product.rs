//! Normalized product and variant records.
//!
//! In memory every field is an `Option`: `None` means the extractor did not
//! find the field, `Some` carries the scraped value. The legacy wire format
//! (a flat map where missing fields appear as fixed placeholder strings like
//! `"SKU not found"`) is preserved by the manual `Serialize`/`Deserialize`
//! impls below, so downstream consumers see exactly the shape they always
//! have while callers inside the workspace can distinguish "scraped" from
//! "defaulted".

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Placeholder strings substituted for missing fields at the wire boundary.
///
/// These are load-bearing: clients match on the exact text, so changing one
/// is a breaking API change.
pub mod sentinel {
    pub const TITLE: &str = "Title not found";
    pub const BRAND: &str = "Brand not found";
    pub const COLOR: &str = "Color not found";
    pub const GENDER: &str = "Gender not found";
    pub const MATERIAL: &str = "Material not found";
    pub const AGE_GROUP: &str = "Age group not found";
    pub const SIZE: &str = "Size not found";
    pub const SKU: &str = "SKU not found";
    pub const BARCODE: &str = "Barcode not found";
    pub const WEIGHT: &str = "Weight not found";
    pub const QUANTITY: &str = "Quantity not found";
    pub const ID: &str = "ID not found";
    pub const IMAGE: &str = "No image found";
}

/// One scraped catalog item: scalar attributes plus the expanded variant list.
///
/// Created fresh per extraction call and never mutated after being returned.
/// Serializing the same record twice yields byte-identical JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRecord {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub gender: Option<String>,
    pub material: Option<String>,
    pub age_group: Option<String>,
    pub size: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub weight: Option<String>,
    pub quantity: Option<String>,
    /// Storefront-internal numeric product id, kept as a string to match the
    /// regex capture it usually comes from.
    pub id: Option<String>,
    pub image: Option<String>,
    pub variants: Vec<VariantRecord>,
}

/// One purchasable size/SKU combination, derived from a single entry of the
/// storefront's embedded variants list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantRecord {
    pub size: Option<String>,
    pub id: Option<i64>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub quantity: Option<i64>,
    pub weight: Option<i64>,
}

impl ProductRecord {
    /// Returns the title, or its placeholder when the title was not scraped.
    /// Convenient for progress messages.
    #[must_use]
    pub fn title_or_placeholder(&self) -> &str {
        self.title.as_deref().unwrap_or(sentinel::TITLE)
    }

    /// Returns `true` if at least one variant was expanded from embedded data.
    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }
}

impl Serialize for ProductRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(14))?;
        map.serialize_entry("Title", self.title.as_deref().unwrap_or(sentinel::TITLE))?;
        map.serialize_entry("Brand", self.brand.as_deref().unwrap_or(sentinel::BRAND))?;
        map.serialize_entry("Color", self.color.as_deref().unwrap_or(sentinel::COLOR))?;
        map.serialize_entry("Gender", self.gender.as_deref().unwrap_or(sentinel::GENDER))?;
        map.serialize_entry(
            "Material",
            self.material.as_deref().unwrap_or(sentinel::MATERIAL),
        )?;
        map.serialize_entry(
            "Age group",
            self.age_group.as_deref().unwrap_or(sentinel::AGE_GROUP),
        )?;
        map.serialize_entry("Size", self.size.as_deref().unwrap_or(sentinel::SIZE))?;
        map.serialize_entry("SKU", self.sku.as_deref().unwrap_or(sentinel::SKU))?;
        map.serialize_entry(
            "Barcode",
            self.barcode.as_deref().unwrap_or(sentinel::BARCODE),
        )?;
        map.serialize_entry("Weight", self.weight.as_deref().unwrap_or(sentinel::WEIGHT))?;
        map.serialize_entry(
            "Quantity",
            self.quantity.as_deref().unwrap_or(sentinel::QUANTITY),
        )?;
        map.serialize_entry("id", self.id.as_deref().unwrap_or(sentinel::ID))?;
        map.serialize_entry("Image", self.image.as_deref().unwrap_or(sentinel::IMAGE))?;
        map.serialize_entry("Variants", &self.variants)?;
        map.end()
    }
}

impl Serialize for VariantRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("Size", self.size.as_deref().unwrap_or(sentinel::SIZE))?;
        match self.id {
            Some(id) => map.serialize_entry("ID", &id)?,
            None => map.serialize_entry("ID", sentinel::ID)?,
        }
        map.serialize_entry("SKU", self.sku.as_deref().unwrap_or(sentinel::SKU))?;
        map.serialize_entry(
            "Barcode",
            self.barcode.as_deref().unwrap_or(sentinel::BARCODE),
        )?;
        match self.quantity {
            Some(quantity) => map.serialize_entry("Quantity", &quantity)?,
            None => map.serialize_entry("Quantity", sentinel::QUANTITY)?,
        }
        match self.weight {
            Some(weight) => map.serialize_entry("Weight", &weight)?,
            None => map.serialize_entry("Weight", sentinel::WEIGHT)?,
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Deserialization: wire map -> record, sentinel text -> None
// ---------------------------------------------------------------------------

/// A wire value that may be a number or a placeholder string.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

impl NumberOrText {
    /// Numbers pass through; numeric strings parse; anything else (including
    /// the placeholder text) maps to `None`.
    fn into_i64(self) -> Option<i64> {
        match self {
            NumberOrText::Number(n) => Some(n),
            NumberOrText::Text(t) => t.parse().ok(),
        }
    }
}

fn absorb(field: Option<String>, placeholder: &str) -> Option<String> {
    field.filter(|value| value != placeholder)
}

#[derive(Deserialize)]
struct WireProduct {
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Brand", default)]
    brand: Option<String>,
    #[serde(rename = "Color", default)]
    color: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Material", default)]
    material: Option<String>,
    #[serde(rename = "Age group", default)]
    age_group: Option<String>,
    #[serde(rename = "Size", default)]
    size: Option<String>,
    #[serde(rename = "SKU", default)]
    sku: Option<String>,
    #[serde(rename = "Barcode", default)]
    barcode: Option<String>,
    #[serde(rename = "Weight", default)]
    weight: Option<String>,
    #[serde(rename = "Quantity", default)]
    quantity: Option<String>,
    #[serde(rename = "id", default)]
    id: Option<String>,
    #[serde(rename = "Image", default)]
    image: Option<String>,
    #[serde(rename = "Variants", default)]
    variants: Vec<WireVariant>,
}

#[derive(Deserialize)]
struct WireVariant {
    #[serde(rename = "Size", default)]
    size: Option<String>,
    #[serde(rename = "ID", default)]
    id: Option<NumberOrText>,
    #[serde(rename = "SKU", default)]
    sku: Option<String>,
    #[serde(rename = "Barcode", default)]
    barcode: Option<String>,
    #[serde(rename = "Quantity", default)]
    quantity: Option<NumberOrText>,
    #[serde(rename = "Weight", default)]
    weight: Option<NumberOrText>,
}

impl<'de> Deserialize<'de> for ProductRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireProduct::deserialize(deserializer)?;
        Ok(ProductRecord {
            title: absorb(wire.title, sentinel::TITLE),
            brand: absorb(wire.brand, sentinel::BRAND),
            color: absorb(wire.color, sentinel::COLOR),
            gender: absorb(wire.gender, sentinel::GENDER),
            material: absorb(wire.material, sentinel::MATERIAL),
            age_group: absorb(wire.age_group, sentinel::AGE_GROUP),
            size: absorb(wire.size, sentinel::SIZE),
            sku: absorb(wire.sku, sentinel::SKU),
            barcode: absorb(wire.barcode, sentinel::BARCODE),
            weight: absorb(wire.weight, sentinel::WEIGHT),
            quantity: absorb(wire.quantity, sentinel::QUANTITY),
            id: absorb(wire.id, sentinel::ID),
            image: absorb(wire.image, sentinel::IMAGE),
            variants: wire.variants.into_iter().map(VariantRecord::from).collect(),
        })
    }
}

impl<'de> Deserialize<'de> for VariantRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        WireVariant::deserialize(deserializer).map(VariantRecord::from)
    }
}

impl From<WireVariant> for VariantRecord {
    fn from(wire: WireVariant) -> Self {
        VariantRecord {
            size: absorb(wire.size, sentinel::SIZE),
            id: wire.id.and_then(NumberOrText::into_i64),
            sku: absorb(wire.sku, sentinel::SKU),
            barcode: absorb(wire.barcode, sentinel::BARCODE),
            quantity: wire.quantity.and_then(NumberOrText::into_i64),
            weight: wire.weight.and_then(NumberOrText::into_i64),
        }
    }
}
