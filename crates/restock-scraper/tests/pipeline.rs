//! End-to-end scrape tests: wiremock serves storefront fixtures, the full
//! pipeline turns them into records.

use std::sync::{Arc, Mutex};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use restock_core::{NullSink, ProgressEvent, ProgressSink};
use restock_scraper::{
    CollectionScraper, FetcherConfig, HttpFetcher, PageAcquirer, ProductScraper, ScrapeError,
    TemplateProfile,
};

const PRODUCT_PAGE: &str = r#"<html><body>
<h3>Air Jordan 1 Retro High OG</h3>
<h4>Midnight Navy</h4>
<div class="product-thumbnail-slider">
  <div class="thumbnail-slide"><img src="//cdn.example.com/first.jpg"></div>
  <div class="thumbnail-slide"><img src="//cdn.example.com/second.jpg"></div>
</div>
<script>
new Shopify.OptionSelectors("productSelect", {
  product: {"id":7654321098765,"variants":[{"id":111,"option2":"US 9","sku":"SKU-9","barcode":"900001","inventory_quantity":3,"weight":1300},{"id":222,"option2":"US 10","sku":"SKU-10","barcode":"900002","inventory_quantity":5,"weight":1360}]},
  onVariantSelected: selectCallback
});
var meta = {"Size":"US 9","type":"Mens"};
</script>
</body></html>"#;

const COLLECTION_PAGE: &str = r#"<html><body>
<a class="collection-item" href="/products/aj1-navy">Air Jordan 1 Navy</a>
<a class="collection-item" href="/products/aj4-bred">Air Jordan 4 Bred</a>
</body></html>"#;

/// Sink that records every event for assertions.
#[derive(Default)]
struct RecordingSink(Mutex<Vec<ProgressEvent>>);

impl ProgressSink for RecordingSink {
    fn publish(&self, event: ProgressEvent) {
        self.0.lock().expect("sink lock").push(event);
    }
}

fn static_acquirer() -> PageAcquirer {
    PageAcquirer::Static(
        HttpFetcher::new(&FetcherConfig::product(5, "restock-test/0.1", 0, 0))
            .expect("build fetcher"),
    )
}

fn collection_fetcher() -> HttpFetcher {
    HttpFetcher::new(&FetcherConfig::collection(5, "restock-test/0.1", 0, 0))
        .expect("build fetcher")
}

#[tokio::test]
async fn scrape_product_builds_a_complete_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/aj1-navy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .mount(&server)
        .await;

    let scraper = ProductScraper::new(
        static_acquirer(),
        TemplateProfile::thumbnail_v2(),
        Arc::new(NullSink),
    );
    let record = scraper
        .scrape_product(&format!("{}/products/aj1-navy", server.uri()))
        .await
        .expect("expected a record");

    assert_eq!(record.title.as_deref(), Some("Air Jordan 1 Retro High OG"));
    assert_eq!(record.color.as_deref(), Some("Midnight Navy"));
    assert_eq!(record.brand.as_deref(), Some("jordan"));
    // thumbnail_v2 derives gender from the embedded type capture.
    assert_eq!(record.gender.as_deref(), Some("Mens"));
    assert_eq!(
        record.image.as_deref(),
        Some("https://cdn.example.com/second.jpg")
    );
    assert_eq!(record.id.as_deref(), Some("7654321098765"));
    assert_eq!(record.variants.len(), 2);
    assert_eq!(record.variants[0].size.as_deref(), Some("US 9"));
    assert_eq!(record.variants[1].id, Some(222));
}

#[tokio::test]
async fn scrape_product_emits_progress_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/aj1-navy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let scraper = ProductScraper::new(
        static_acquirer(),
        TemplateProfile::thumbnail_v2(),
        Arc::clone(&sink) as Arc<dyn ProgressSink>,
    );
    scraper
        .scrape_product(&format!("{}/products/aj1-navy", server.uri()))
        .await
        .expect("expected a record");

    let events = sink.0.lock().expect("sink lock");
    assert_eq!(events[0].message, "Starting scraping...");
    let scraped = events
        .iter()
        .find(|e| e.message.starts_with("Scraped product:"))
        .expect("scraped event");
    assert!(scraped.message.contains("Air Jordan 1 Retro High OG"));
    assert!(scraped.product.is_some());
}

#[tokio::test]
async fn scrape_product_surfaces_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let scraper = ProductScraper::new(
        static_acquirer(),
        TemplateProfile::carousel_v1(),
        Arc::new(NullSink),
    );
    let result = scraper
        .scrape_product(&format!("{}/products/missing", server.uri()))
        .await;

    assert!(
        matches!(result, Err(ScrapeError::UnexpectedStatus { status: 404, .. })),
        "expected UnexpectedStatus(404), got: {result:?}"
    );
}

#[tokio::test]
async fn collection_scrape_stops_after_first_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections/jordan"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COLLECTION_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/aj1-navy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .expect(1)
        .mount(&server)
        .await;
    // The second detail page must never be requested when the walk stops at
    // the first success.
    Mock::given(method("GET"))
        .and(path("/products/aj4-bred"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let product = ProductScraper::new(
        static_acquirer(),
        TemplateProfile::thumbnail_v2(),
        Arc::new(NullSink),
    );
    let collections = CollectionScraper::new(collection_fetcher(), product, server.uri(), true);
    let records = collections
        .scrape(&server.uri(), "Jordan")
        .await
        .expect("expected records");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title.as_deref(), Some("Air Jordan 1 Retro High OG"));
}

#[tokio::test]
async fn collection_scrape_continues_past_failed_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections/nike"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COLLECTION_PAGE))
        .mount(&server)
        .await;
    // First detail page 404s; the walk must move on to the second.
    Mock::given(method("GET"))
        .and(path("/products/aj1-navy"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/aj4-bred"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let product = ProductScraper::new(
        static_acquirer(),
        TemplateProfile::thumbnail_v2(),
        Arc::clone(&sink) as Arc<dyn ProgressSink>,
    );
    let collections = CollectionScraper::new(collection_fetcher(), product, server.uri(), true);
    let records = collections
        .scrape(&server.uri(), "nike")
        .await
        .expect("expected records");

    assert_eq!(records.len(), 1);
    let events = sink.0.lock().expect("sink lock");
    assert!(events
        .iter()
        .any(|e| e.message == "Failed to scrape product: Air Jordan 1 Navy"));
}

#[tokio::test]
async fn collection_scrape_walks_every_item_when_flag_is_off() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections/adidas"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COLLECTION_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/aj1-navy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/aj4-bred"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let product = ProductScraper::new(
        static_acquirer(),
        TemplateProfile::thumbnail_v2(),
        Arc::new(NullSink),
    );
    let collections = CollectionScraper::new(collection_fetcher(), product, server.uri(), false);
    let records = collections
        .scrape(&server.uri(), "ADIDAS")
        .await
        .expect("expected records");

    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn collection_scrape_surfaces_listing_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections/nike"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let product = ProductScraper::new(
        static_acquirer(),
        TemplateProfile::thumbnail_v2(),
        Arc::new(NullSink),
    );
    let collections = CollectionScraper::new(collection_fetcher(), product, server.uri(), true);
    let result = collections.scrape(&server.uri(), "nike").await;

    assert!(
        matches!(result, Err(ScrapeError::UnexpectedStatus { status: 404, .. })),
        "expected UnexpectedStatus(404), got: {result:?}"
    );
}
