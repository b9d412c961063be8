//! Storefront template profiles.
//!
//! Extraction is deliberately coupled to one storefront's markup. The two
//! profiles below describe the template versions observed in the wild; each
//! fixes the storefront-wide constants and the structural convention for the
//! primary product image. Adding support for a new template version means
//! adding a constructor here, not touching the extractors.

use restock_core::TemplateVersion;

/// Where the primary product image lives in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageConvention {
    /// A slick-carousel slide container addressed by its zero-based
    /// `data-slick-index`.
    CarouselSlide { index: usize },
    /// The second `.thumbnail-slide` under `.product-thumbnail-slider`.
    ThumbnailSlider,
}

/// Per-template extraction profile: storefront constants plus the image
/// convention.
#[derive(Debug, Clone)]
pub struct TemplateProfile {
    pub brand: &'static str,
    /// `Some` fixes gender storefront-wide; `None` derives it from the
    /// embedded option-selectors script instead.
    pub gender: Option<&'static str>,
    pub material: &'static str,
    pub age_group: &'static str,
    pub image: ImageConvention,
}

impl TemplateProfile {
    /// Carousel-based template: fixed gender, image in slide 0.
    #[must_use]
    pub fn carousel_v1() -> Self {
        Self {
            brand: "Jordan",
            gender: Some("Unisex"),
            material: "Leather",
            age_group: "Adult",
            image: ImageConvention::CarouselSlide { index: 0 },
        }
    }

    /// Thumbnail-slider template: gender read from embedded data, image from
    /// the second thumbnail.
    #[must_use]
    pub fn thumbnail_v2() -> Self {
        Self {
            brand: "jordan",
            gender: None,
            material: "Leather",
            age_group: "Adult",
            image: ImageConvention::ThumbnailSlider,
        }
    }

    #[must_use]
    pub fn for_version(version: TemplateVersion) -> Self {
        match version {
            TemplateVersion::CarouselV1 => Self::carousel_v1(),
            TemplateVersion::ThumbnailV2 => Self::thumbnail_v2(),
        }
    }
}
