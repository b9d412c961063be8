//! Scrape orchestration: acquisition → extraction → composition, with
//! progress events pushed through an injected [`ProgressSink`].
//!
//! Only acquisition failures surface as `Err`. Every structural or embedded
//! miss degrades to an absent field inside the returned record, so a caller
//! holding `Ok` always has a complete, well-formed record.

use std::sync::Arc;

use scraper::Html;

use restock_core::{ProductRecord, ProgressEvent, ProgressSink};

use crate::collection::{collection_url, detail_url, parse_collection_items};
use crate::dom::extract_scalar_fields;
use crate::embedded::extract_embedded;
use crate::error::ScrapeError;
use crate::fetch::HttpFetcher;
use crate::normalize::compose_record;
use crate::source::PageAcquirer;
use crate::template::TemplateProfile;

/// Scrapes one product page into a [`ProductRecord`].
#[derive(Clone)]
pub struct ProductScraper {
    acquirer: PageAcquirer,
    profile: TemplateProfile,
    sink: Arc<dyn ProgressSink>,
}

impl ProductScraper {
    #[must_use]
    pub fn new(
        acquirer: PageAcquirer,
        profile: TemplateProfile,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            acquirer,
            profile,
            sink,
        }
    }

    /// Fetches `url` and extracts the normalized product record.
    ///
    /// # Errors
    ///
    /// Returns the acquisition [`ScrapeError`]; extraction itself cannot
    /// fail.
    pub async fn scrape_product(&self, url: &str) -> Result<ProductRecord, ScrapeError> {
        self.sink.publish(ProgressEvent::message("Starting scraping..."));

        let html = self.acquirer.acquire(url).await.inspect_err(|e| {
            tracing::warn!(url, error = %e, "product page acquisition failed");
        })?;

        let record = self.extract(&html);
        tracing::info!(
            url,
            title = record.title_or_placeholder(),
            variants = record.variants.len(),
            "scraped product"
        );
        self.sink.publish(ProgressEvent::with_product(
            format!("Scraped product: {}", record.title_or_placeholder()),
            record.clone(),
        ));

        Ok(record)
    }

    /// Runs the extraction pipeline over already-acquired markup.
    ///
    /// Deterministic: the same markup always yields the same record.
    #[must_use]
    pub fn extract(&self, html: &str) -> ProductRecord {
        let document = Html::parse_document(html);
        let dom = extract_scalar_fields(&document, &self.profile.image);
        let embedded = extract_embedded(&document);
        if embedded.is_none() {
            tracing::debug!("no option-selectors script found in document");
        }
        compose_record(&self.profile, dom, embedded)
    }

    pub(crate) fn sink(&self) -> &Arc<dyn ProgressSink> {
        &self.sink
    }
}

/// Walks a brand collection page and drives [`ProductScraper`] over its
/// items, one at a time.
#[derive(Clone)]
pub struct CollectionScraper {
    fetcher: HttpFetcher,
    product: ProductScraper,
    origin: String,
    /// Stop at the first successfully scraped product. Matches observed
    /// behavior; see DESIGN.md.
    stop_after_first: bool,
}

impl CollectionScraper {
    #[must_use]
    pub fn new(
        fetcher: HttpFetcher,
        product: ProductScraper,
        origin: String,
        stop_after_first: bool,
    ) -> Self {
        Self {
            fetcher,
            product,
            origin,
            stop_after_first,
        }
    }

    /// Fetches the brand's collection page and scrapes its product pages
    /// sequentially, in listing order.
    ///
    /// Per-item failures emit a progress message and move on to the next
    /// item; only the collection page fetch itself is fatal.
    ///
    /// # Errors
    ///
    /// Returns the [`ScrapeError`] from fetching the collection page.
    pub async fn scrape(
        &self,
        base_url: &str,
        brand_raw: &str,
    ) -> Result<Vec<ProductRecord>, ScrapeError> {
        let url = collection_url(base_url, brand_raw.parse().ok());
        self.product.sink().publish(ProgressEvent::message(format!(
            "Starting to scrape {brand_raw} products..."
        )));

        let html = self.fetcher.fetch(&url).await?;
        let items = parse_collection_items(&html);
        tracing::info!(url = %url, items = items.len(), "enumerated collection page");

        let mut records = Vec::new();
        for item in items {
            let detail = detail_url(&self.origin, &item.link);
            match self.product.scrape_product(&detail).await {
                Ok(record) => {
                    records.push(record);
                    if self.stop_after_first {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(url = %detail, error = %e, "skipping collection item");
                    self.product.sink().publish(ProgressEvent::message(format!(
                        "Failed to scrape product: {}",
                        item.name
                    )));
                }
            }
        }

        Ok(records)
    }
}
