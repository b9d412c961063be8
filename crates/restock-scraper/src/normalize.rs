//! Composition of extractor outputs into a [`ProductRecord`].
//!
//! The merge is an additive union: the template profile supplies the
//! storefront constants, the DOM extractor supplies title/color/image, and
//! the embedded extractor supplies the variant-level scalars. No field is
//! produced by two sources in the known templates — gender in particular
//! comes from exactly one of profile constant or embedded `type` capture,
//! decided by the profile.

use restock_core::ProductRecord;

use crate::dom::DomFields;
use crate::embedded::{expand_variants, EmbeddedFields};
use crate::template::TemplateProfile;

/// Merges the extractor outputs into one record.
///
/// The embedded product object's id, when parsed, overrides the
/// pattern-matched id. Absent inputs leave their fields `None`; placeholder
/// text materializes only at the serialization boundary.
#[must_use]
pub fn compose_record(
    profile: &TemplateProfile,
    dom: DomFields,
    embedded: Option<EmbeddedFields>,
) -> ProductRecord {
    let mut record = ProductRecord {
        title: dom.title,
        brand: Some(profile.brand.to_owned()),
        color: dom.color,
        gender: profile.gender.map(str::to_owned),
        material: Some(profile.material.to_owned()),
        age_group: Some(profile.age_group.to_owned()),
        image: dom.image,
        ..ProductRecord::default()
    };

    let Some(embedded) = embedded else {
        return record;
    };

    record.size = embedded.size;
    record.sku = embedded.sku;
    record.barcode = embedded.barcode;
    record.weight = embedded.weight;
    record.quantity = embedded.quantity;
    record.id = embedded.id;

    if record.gender.is_none() {
        record.gender = embedded.gender;
    }

    if let Some(product) = embedded.product {
        if let Some(id) = product.id {
            record.id = Some(id.to_string());
        }
        record.variants = expand_variants(&product);
    }

    record
}
