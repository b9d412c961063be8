//! HTTP document fetcher with bounded retry and exponential backoff.
//!
//! Transient failures (network errors and a configurable set of server-error
//! statuses) are retried with exponential backoff; every other error status
//! is surfaced immediately as a typed [`ScrapeError`]. Nothing past this
//! boundary panics on a bad response.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::ScrapeError;

/// Server-error statuses retried on the single-product path.
pub const PRODUCT_RETRY_STATUSES: &[u16] = &[502, 503, 504];

/// Server-error statuses retried on the collection-listing path, which also
/// tolerates plain 500s from the storefront.
pub const COLLECTION_RETRY_STATUSES: &[u16] = &[500, 502, 503, 504];

/// Construction parameters for an [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Number of additional attempts after the first failure. `0` disables
    /// retries.
    pub max_retries: u32,
    /// Base delay for exponential backoff: the wait before the n-th retry is
    /// `backoff_base_secs * 2^(n-1)` seconds.
    pub backoff_base_secs: u64,
    /// HTTP statuses treated as transient.
    pub retry_statuses: &'static [u16],
}

impl FetcherConfig {
    /// Profile for single product pages: generous timeout, five retries on
    /// gateway errors.
    #[must_use]
    pub fn product(timeout_secs: u64, user_agent: &str, max_retries: u32, backoff_base_secs: u64) -> Self {
        Self {
            timeout_secs,
            user_agent: user_agent.to_owned(),
            max_retries,
            backoff_base_secs,
            retry_statuses: PRODUCT_RETRY_STATUSES,
        }
    }

    /// Profile for collection listing pages: tight timeout, three retries,
    /// and 500 included in the transient set.
    #[must_use]
    pub fn collection(timeout_secs: u64, user_agent: &str, max_retries: u32, backoff_base_secs: u64) -> Self {
        Self {
            timeout_secs,
            user_agent: user_agent.to_owned(),
            max_retries,
            backoff_base_secs,
            retry_statuses: COLLECTION_RETRY_STATUSES,
        }
    }
}

/// HTTP client for fetching storefront markup.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
    retry_statuses: &'static [u16],
}

impl HttpFetcher {
    /// Creates a fetcher with configured timeout, `User-Agent`, and retry
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(config: &FetcherConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries: config.max_retries,
            backoff_base_secs: config.backoff_base_secs,
            retry_statuses: config.retry_statuses,
        })
    }

    /// Fetches the body of `url`, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`] — non-2xx status; statuses in the
    ///   configured transient set are retried first, everything else fails
    ///   immediately.
    /// - [`ScrapeError::Http`] — network or TLS failure after all retries
    ///   are exhausted.
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let retry_statuses = self.retry_statuses;
        retry_with_backoff(
            self.max_retries,
            self.backoff_base_secs,
            |err| is_retriable(err, retry_statuses),
            || {
                let url = url.to_owned();
                async move {
                    let response = self.client.get(&url).send().await?;
                    let status = response.status();

                    if !status.is_success() {
                        return Err(ScrapeError::UnexpectedStatus {
                            status: status.as_u16(),
                            url,
                        });
                    }

                    Ok(response.text().await?)
                }
            },
        )
        .await
    }
}

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable: network-level failures, and error statuses in `retry_statuses`.
/// Everything else (other 4xx/5xx statuses, render failures) is propagated
/// immediately.
fn is_retriable(err: &ScrapeError, retry_statuses: &[u16]) -> bool {
    match err {
        ScrapeError::Http(_) => true,
        ScrapeError::UnexpectedStatus { status, .. } => retry_statuses.contains(status),
        ScrapeError::Render { .. } => false,
    }
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// On a retriable error (per `is_retriable`) the function sleeps for
/// `backoff_base_secs * 2^attempt` seconds and tries again, up to
/// `max_retries` additional attempts after the first try. Exhausting the
/// retries returns the last error; non-retriable errors return immediately.
pub(crate) async fn retry_with_backoff<T, P, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    is_retriable: P,
    mut operation: F,
) -> Result<T, ScrapeError>
where
    P: Fn(&ScrapeError) -> bool,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScrapeError>>,
{
    let mut last_err;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                last_err = err;
            }
        }

        // Exponential backoff: base * 2^attempt seconds, shift capped so
        // extreme configs cannot overflow.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "transient fetch error — retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
