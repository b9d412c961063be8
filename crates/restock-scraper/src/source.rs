//! Page-content acquisition: one capability, two interchangeable strategies.

use restock_core::{AcquisitionMode, AppConfig};

use crate::error::ScrapeError;
use crate::fetch::{FetcherConfig, HttpFetcher};
use crate::render::ChromeRenderer;

/// How markup is obtained for a URL. Selected by configuration; callers only
/// see `acquire`.
#[derive(Debug, Clone)]
pub enum PageAcquirer {
    /// Plain HTTP GET with retry/backoff.
    Static(HttpFetcher),
    /// Headless-browser render for templates that populate content
    /// asynchronously.
    Rendered(ChromeRenderer),
}

impl PageAcquirer {
    /// Builds the acquirer selected by `config.acquisition`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the static fetcher's HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScrapeError> {
        match config.acquisition {
            AcquisitionMode::Static => {
                let fetcher = HttpFetcher::new(&FetcherConfig::product(
                    config.scraper_timeout_secs,
                    &config.scraper_user_agent,
                    config.scraper_max_retries,
                    config.scraper_backoff_base_secs,
                ))?;
                Ok(Self::Static(fetcher))
            }
            AcquisitionMode::Rendered => {
                Ok(Self::Rendered(ChromeRenderer::new(config.render_wait_secs)))
            }
        }
    }

    /// Returns the page content for `url` from whichever strategy is active.
    ///
    /// # Errors
    ///
    /// Propagates the underlying strategy's [`ScrapeError`].
    pub async fn acquire(&self, url: &str) -> Result<String, ScrapeError> {
        match self {
            PageAcquirer::Static(fetcher) => fetcher.fetch(url).await,
            PageAcquirer::Rendered(renderer) => renderer.acquire(url).await,
        }
    }
}
