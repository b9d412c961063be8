//! Rendered-page acquisition through headless Chrome.
//!
//! `headless_chrome` is a blocking API, so each render runs inside
//! `tokio::task::spawn_blocking`. The browser session lives entirely inside
//! the blocking closure: whatever path the render takes, dropping the
//! `Browser` at closure exit tears the session down.

use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions};

use crate::error::ScrapeError;

/// Acquires page content by rendering it in an isolated headless Chrome
/// session and returning the resulting document HTML.
#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    /// Upper bound on the implicit wait for asynchronously loaded content.
    wait_secs: u64,
}

impl ChromeRenderer {
    #[must_use]
    pub fn new(wait_secs: u64) -> Self {
        Self { wait_secs }
    }

    /// Renders `url` and returns the document HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Render`] when Chrome cannot be launched, the
    /// navigation fails, or the content cannot be read back.
    pub async fn acquire(&self, url: &str) -> Result<String, ScrapeError> {
        let target = url.to_owned();
        let wait = Duration::from_secs(self.wait_secs);

        let rendered = tokio::task::spawn_blocking(move || render_page(&target, wait)).await;

        match rendered {
            Ok(result) => result,
            Err(join_err) => Err(ScrapeError::Render {
                url: url.to_owned(),
                reason: format!("render task failed: {join_err}"),
            }),
        }
    }
}

fn render_page(url: &str, wait: Duration) -> Result<String, ScrapeError> {
    let render_err = |reason: String| ScrapeError::Render {
        url: url.to_owned(),
        reason,
    };

    let options = LaunchOptions::default_builder()
        .headless(true)
        .build()
        .map_err(|e| render_err(e.to_string()))?;
    let browser = Browser::new(options).map_err(|e| render_err(e.to_string()))?;
    let tab = browser.new_tab().map_err(|e| render_err(e.to_string()))?;

    tab.navigate_to(url).map_err(|e| render_err(e.to_string()))?;
    tab.wait_until_navigated()
        .map_err(|e| render_err(e.to_string()))?;

    // Implicit wait for asynchronous content: the title heading is the first
    // node the extractor needs. Its absence is a structural miss handled
    // downstream, not a render failure.
    if tab
        .wait_for_element_with_custom_timeout("h3", wait)
        .is_err()
    {
        tracing::debug!(url, "title heading did not appear within the render wait");
    }

    tab.get_content().map_err(|e| render_err(e.to_string()))
    // Browser drops here, ending the headless session on every exit path.
}
