use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which of the two observed storefront template versions the extractor
/// should assume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateVersion {
    /// Carousel markup: primary image lives in the slide at slick index 0,
    /// gender is a storefront-wide constant.
    CarouselV1,
    /// Thumbnail-slider markup: primary image is the second thumbnail,
    /// gender comes from the embedded option-selectors script.
    ThumbnailV2,
}

/// How page content is acquired: a plain HTTP GET, or a headless browser
/// session that renders asynchronous content first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionMode {
    Static,
    Rendered,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Origin prefixed onto relative collection-item links.
    pub store_origin: String,
    pub template: TemplateVersion,
    pub acquisition: AcquisitionMode,
    pub upload_dir: PathBuf,
    pub scraper_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_retries: u32,
    pub scraper_backoff_base_secs: u64,
    pub collection_timeout_secs: u64,
    pub collection_max_retries: u32,
    /// Stop the collection walk at the first successfully scraped product.
    /// Matches observed behavior; see DESIGN.md before changing the default.
    pub collect_stop_after_first: bool,
    pub render_wait_secs: u64,
    pub shopify_store: Option<String>,
    pub shopify_api_key: Option<String>,
    pub shopify_password: Option<String>,
    pub shopify_default_price: String,
    pub shipping_weight: String,
    pub shipping_policy: String,
    pub returns_policy: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("store_origin", &self.store_origin)
            .field("template", &self.template)
            .field("acquisition", &self.acquisition)
            .field("upload_dir", &self.upload_dir)
            .field("scraper_timeout_secs", &self.scraper_timeout_secs)
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_max_retries", &self.scraper_max_retries)
            .field(
                "scraper_backoff_base_secs",
                &self.scraper_backoff_base_secs,
            )
            .field("collection_timeout_secs", &self.collection_timeout_secs)
            .field("collection_max_retries", &self.collection_max_retries)
            .field("collect_stop_after_first", &self.collect_stop_after_first)
            .field("render_wait_secs", &self.render_wait_secs)
            .field("shopify_store", &self.shopify_store)
            .field(
                "shopify_api_key",
                &self.shopify_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "shopify_password",
                &self.shopify_password.as_ref().map(|_| "[redacted]"),
            )
            .field("shopify_default_price", &self.shopify_default_price)
            .finish_non_exhaustive()
    }
}
