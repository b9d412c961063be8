//! Brand collection enumeration.
//!
//! Builds the per-brand collection URL, parses the listing page's item
//! anchors, and joins relative detail links against the storefront origin.

use std::str::FromStr;

use scraper::{Html, Selector};

/// The storefront brands with dedicated collection pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brand {
    Adidas,
    Nike,
    Jordan,
}

impl Brand {
    /// URL path segment for the brand's collection page.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Brand::Adidas => "adidas",
            Brand::Nike => "nike",
            Brand::Jordan => "jordan",
        }
    }
}

impl FromStr for Brand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adidas" => Ok(Brand::Adidas),
            "nike" => Ok(Brand::Nike),
            "jordan" => Ok(Brand::Jordan),
            _ => Err(()),
        }
    }
}

/// One entry of a collection listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItem {
    pub name: String,
    pub link: String,
}

/// Appends the brand's collection path to `base_url`. An unrecognized brand
/// leaves the URL unmodified.
#[must_use]
pub fn collection_url(base_url: &str, brand: Option<Brand>) -> String {
    match brand {
        Some(brand) => format!(
            "{}/collections/{}",
            base_url.trim_end_matches('/'),
            brand.slug()
        ),
        None => base_url.to_owned(),
    }
}

/// Parses the collection listing's item anchors into link/name pairs,
/// preserving document order.
#[must_use]
pub fn parse_collection_items(html: &str) -> Vec<CollectionItem> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a.collection-item").expect("valid collection selector");

    document
        .select(&selector)
        .filter_map(|anchor| {
            let link = anchor.value().attr("href")?.to_owned();
            let name = anchor.text().collect::<String>().trim().to_owned();
            Some(CollectionItem { name, link })
        })
        .collect()
}

/// Joins a collection-item link against the storefront origin. Links that are
/// already absolute pass through unchanged.
#[must_use]
pub fn detail_url(origin: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        return link.to_owned();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        link.trim_start_matches('/')
    )
}
