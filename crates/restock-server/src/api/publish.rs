//! Publish route: push a scraped record to the downstream catalog.
//!
//! The record travels inside the request body — the result of a scrape is
//! threaded explicitly from the client back into publish, never held in
//! shared server state. Success and failure are both reported explicitly.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use restock_core::{ProductRecord, ProgressEvent};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct PublishRequest {
    #[serde(default)]
    sku: Option<String>,
    product: ProductRecord,
}

#[derive(Debug, Serialize)]
pub(super) struct PublishResponse {
    status: &'static str,
    product_id: i64,
}

/// `POST /api/v1/publish`.
pub(super) async fn publish_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<PublishRequest>,
) -> Result<Json<PublishResponse>, ApiError> {
    let Some(publisher) = state.publisher.as_ref() else {
        return Err(ApiError::new(
            req_id.0,
            "not_configured",
            "catalog credentials are not configured",
        ));
    };

    let _ = state
        .progress
        .send(ProgressEvent::message("Uploading to catalog..."));

    match publisher
        .publish(&request.product, request.sku.as_deref(), &state.policy)
        .await
    {
        Ok(published) => {
            let _ = state
                .progress
                .send(ProgressEvent::message("Upload completed!"));
            Ok(Json(PublishResponse {
                status: "published",
                product_id: published.id,
            }))
        }
        Err(e) => {
            tracing::warn!(error = %e, "publish request failed");
            let _ = state
                .progress
                .send(ProgressEvent::message(format!("Upload failed: {e}")));
            Err(ApiError::new(req_id.0, "bad_gateway", "catalog publish failed"))
        }
    }
}
