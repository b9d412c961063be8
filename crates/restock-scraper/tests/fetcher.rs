//! Integration tests for `HttpFetcher::fetch`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the happy path, the transient-status
//! retry behavior for both fetcher profiles, and retry exhaustion.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use restock_scraper::{FetcherConfig, HttpFetcher, ScrapeError};

/// Fetcher with the product profile, no retries, zero backoff.
fn product_fetcher() -> HttpFetcher {
    HttpFetcher::new(&FetcherConfig::product(5, "restock-test/0.1", 0, 0))
        .expect("failed to build test fetcher")
}

fn product_fetcher_with_retries(max_retries: u32) -> HttpFetcher {
    HttpFetcher::new(&FetcherConfig::product(5, "restock-test/0.1", max_retries, 0))
        .expect("failed to build test fetcher")
}

fn collection_fetcher_with_retries(max_retries: u32) -> HttpFetcher {
    HttpFetcher::new(&FetcherConfig::collection(5, "restock-test/0.1", max_retries, 0))
        .expect("failed to build test fetcher")
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_returns_the_response_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/aj1-navy"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><h3>AJ1</h3></html>"))
        .mount(&server)
        .await;

    let body = product_fetcher()
        .fetch(&format!("{}/products/aj1-navy", server.uri()))
        .await
        .expect("expected Ok");
    assert!(body.contains("<h3>AJ1</h3>"));
}

// ---------------------------------------------------------------------------
// Transient gateway errors are retried
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_retries_through_two_503s_and_succeeds() {
    let server = MockServer::start().await;

    // First two requests return 503, then fall through to the 200 mock.
    Mock::given(method("GET"))
        .and(path("/products/aj1-navy"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products/aj1-navy"))
        .respond_with(ResponseTemplate::new(200).set_body_string("eventually fine"))
        .mount(&server)
        .await;

    let body = product_fetcher_with_retries(3)
        .fetch(&format!("{}/products/aj1-navy", server.uri()))
        .await
        .expect("expected Ok after transient 503s");
    assert_eq!(body, "eventually fine");
}

#[tokio::test]
async fn fetch_returns_error_after_exhausting_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/aj1-navy"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3) // 1 initial + 2 retries
        .mount(&server)
        .await;

    let result = product_fetcher_with_retries(2)
        .fetch(&format!("{}/products/aj1-navy", server.uri()))
        .await;

    match result {
        Err(ScrapeError::UnexpectedStatus { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected UnexpectedStatus after retry exhaustion, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Non-transient statuses fail immediately
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_does_not_retry_client_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = product_fetcher_with_retries(3)
        .fetch(&format!("{}/products/gone", server.uri()))
        .await;

    match result {
        Err(ScrapeError::UnexpectedStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected UnexpectedStatus(404), got: {other:?}"),
    }
}

#[tokio::test]
async fn product_profile_treats_500_as_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let result = product_fetcher_with_retries(3)
        .fetch(&format!("{}/products/flaky", server.uri()))
        .await;

    assert!(
        matches!(result, Err(ScrapeError::UnexpectedStatus { status: 500, .. })),
        "expected immediate UnexpectedStatus(500), got: {result:?}"
    );
}

#[tokio::test]
async fn collection_profile_retries_500() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/nike"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/nike"))
        .respond_with(ResponseTemplate::new(200).set_body_string("listing"))
        .mount(&server)
        .await;

    let body = collection_fetcher_with_retries(1)
        .fetch(&format!("{}/collections/nike", server.uri()))
        .await
        .expect("expected Ok after 500 retry");
    assert_eq!(body, "listing");
}
