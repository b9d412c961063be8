mod events;
mod images;
mod publish;
mod scrape;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use restock_core::{AppConfig, ProgressEvent};
use restock_scraper::{
    CollectionScraper, FetcherConfig, HttpFetcher, PageAcquirer, ProductScraper, TemplateProfile,
};
use restock_shopify::{CatalogPublisher, ShippingPolicy};

use crate::middleware::{request_id, RequestId};

pub use events::BroadcastSink;

/// Capacity of the progress broadcast channel. Slow subscribers beyond this
/// lag and skip events rather than applying backpressure to the pipeline.
const PROGRESS_CHANNEL_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub scraper: ProductScraper,
    pub collections: CollectionScraper,
    pub publisher: Option<Arc<CatalogPublisher>>,
    pub policy: ShippingPolicy,
    pub progress: broadcast::Sender<ProgressEvent>,
}

/// Builds the shared application state from configuration: the scrape
/// pipeline wired to the broadcast progress sink, and the catalog publisher
/// when credentials are configured.
pub fn build_state(config: Arc<AppConfig>) -> anyhow::Result<AppState> {
    let (progress, _) = broadcast::channel(PROGRESS_CHANNEL_CAPACITY);
    let sink = Arc::new(BroadcastSink::new(progress.clone()));

    let acquirer = PageAcquirer::from_config(&config)?;
    let profile = TemplateProfile::for_version(config.template);
    let scraper = ProductScraper::new(acquirer, profile, sink);

    let collection_fetcher = HttpFetcher::new(&FetcherConfig::collection(
        config.collection_timeout_secs,
        &config.scraper_user_agent,
        config.collection_max_retries,
        config.scraper_backoff_base_secs,
    ))?;
    let collections = CollectionScraper::new(
        collection_fetcher,
        scraper.clone(),
        config.store_origin.clone(),
        config.collect_stop_after_first,
    );

    let publisher = match (
        config.shopify_store.as_deref(),
        config.shopify_api_key.as_deref(),
        config.shopify_password.as_deref(),
    ) {
        (Some(store), Some(api_key), Some(password)) => Some(Arc::new(CatalogPublisher::new(
            store,
            api_key,
            password,
            &config.shopify_default_price,
            config.scraper_timeout_secs,
        )?)),
        _ => {
            tracing::warn!("catalog credentials not configured; /api/v1/publish will be rejected");
            None
        }
    };

    let policy = ShippingPolicy {
        shipping_weight: config.shipping_weight.clone(),
        shipping_policy: config.shipping_policy.clone(),
        returns_policy: config.returns_policy.clone(),
    };

    Ok(AppState {
        config,
        scraper,
        collections,
        publisher,
        policy,
        progress,
    })
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "bad_gateway" => StatusCode::BAD_GATEWAY,
            "not_configured" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/scrape", post(scrape::scrape_product))
        .route(
            "/api/v1/collections/scrape",
            post(scrape::scrape_collection),
        )
        .route("/api/v1/publish", post(publish::publish_product))
        .route("/api/v1/images", post(images::upload_image))
        .route("/api/v1/events", get(events::progress_events))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}
