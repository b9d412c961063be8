//! Scrape routes: single product and brand collection.
//!
//! Responses carry the record in its legacy flat shape (placeholder strings
//! for missing fields, variants nested under `Variants`), so existing
//! clients keep working unchanged.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::Deserialize;

use restock_core::ProductRecord;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    url: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CollectionScrapeRequest {
    url: String,
    brand: String,
}

/// `POST /api/v1/scrape` — scrape one product page.
pub(super) async fn scrape_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ProductRecord>, ApiError> {
    if request.url.trim().is_empty() {
        return Err(ApiError::new(req_id.0, "bad_request", "url must not be empty"));
    }

    match state.scraper.scrape_product(&request.url).await {
        Ok(record) => Ok(Json(record)),
        Err(e) => {
            tracing::warn!(url = %request.url, error = %e, "scrape request failed");
            Err(ApiError::new(req_id.0, "bad_gateway", "failed to fetch the page"))
        }
    }
}

/// `POST /api/v1/collections/scrape` — walk a brand collection and return
/// the first successfully scraped product.
pub(super) async fn scrape_collection(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<CollectionScrapeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.url.trim().is_empty() {
        return Err(ApiError::new(req_id.0, "bad_request", "url must not be empty"));
    }

    let records = state
        .collections
        .scrape(&request.url, &request.brand)
        .await
        .map_err(|e| {
            tracing::warn!(url = %request.url, brand = %request.brand, error = %e, "collection scrape failed");
            ApiError::new(req_id.0.clone(), "bad_gateway", "failed to fetch the page")
        })?;

    records.into_iter().next().map(Json).ok_or_else(|| {
        ApiError::new(
            req_id.0,
            "not_found",
            "no products could be scraped from the collection",
        )
    })
}
