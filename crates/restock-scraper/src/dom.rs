//! Structural field extraction from product-page markup.
//!
//! Known limitation: title and color come from the *first* `h3`/`h4` in
//! document order. That positional convention holds for the one storefront
//! template this crate targets and nothing else; a missing heading degrades
//! to an absent field rather than an error.

use scraper::{ElementRef, Html, Selector};

use crate::template::ImageConvention;

/// Scalar fields read from the document structure. `None` means the expected
/// node was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomFields {
    pub title: Option<String>,
    pub color: Option<String>,
    pub image: Option<String>,
}

/// Extracts title, color, and the primary image URL from parsed markup.
#[must_use]
pub fn extract_scalar_fields(document: &Html, convention: &ImageConvention) -> DomFields {
    DomFields {
        title: first_heading_text(document, "h3"),
        color: first_heading_text(document, "h4"),
        image: extract_image(document, convention),
    }
}

fn first_heading_text(document: &Html, tag: &str) -> Option<String> {
    let selector = Selector::parse(tag).expect("valid heading selector");
    document.select(&selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

fn extract_image(document: &Html, convention: &ImageConvention) -> Option<String> {
    let src = match convention {
        ImageConvention::CarouselSlide { index } => {
            let selector = Selector::parse(&format!("div[data-slick-index=\"{index}\"] img"))
                .expect("valid carousel selector");
            document
                .select(&selector)
                .next()
                .and_then(|img| img.value().attr("src"))
        }
        ImageConvention::ThumbnailSlider => {
            let slide_selector =
                Selector::parse(".product-thumbnail-slider .thumbnail-slide")
                    .expect("valid thumbnail selector");
            let img_selector = Selector::parse("img").expect("valid img selector");
            document
                .select(&slide_selector)
                .nth(1)
                .and_then(|slide| slide.select(&img_selector).next())
                .and_then(|img| img.value().attr("src"))
        }
    }?;

    Some(normalize_image_url(src))
}

/// Rewrites protocol-relative CDN URLs (`//host/path`) to explicit HTTPS;
/// everything else passes through unchanged.
#[must_use]
pub fn normalize_image_url(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else {
        src.to_owned()
    }
}
