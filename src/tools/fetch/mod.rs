//! Fetch Tools
//!
//! One GET per call with a browser-like header set. No retries here; retry
//! policy belongs to the caller.

mod client;
mod headers;
mod utils;

pub mod types;

pub use types::*;

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use utils::{check_status, classify_request_error};

/// Anything that can turn a URL into raw page bytes.
///
/// The scrape pipeline only talks to this trait, so tests and alternate
/// transports can stand in for [`HttpFetcher`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<FetchedPage>;
}

/// reqwest-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    options: FetchOptions,
}

impl HttpFetcher {
    pub fn new(options: FetchOptions) -> Result<Self> {
        let client = client::build_client(options.timeout())?;
        Ok(Self { client, options })
    }

    async fn get(&self, url: &str) -> Result<FetchedPage> {
        let start = Instant::now();
        let timeout_ms = self.options.timeout_ms;

        let response = self
            .client
            .get(url)
            .headers(headers::browser_headers())
            .send()
            .await
            .map_err(|e| classify_request_error(e, timeout_ms))?;

        let status = response.status();
        check_status(status)?;
        let final_url = response.url().to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_request_error(e, timeout_ms))?;

        Ok(FetchedPage {
            bytes: bytes.to_vec(),
            status: status.as_u16(),
            final_url,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<FetchedPage> {
        let timeout_ms = self.options.timeout_ms;

        if cancel.is_cancelled() {
            return Err(Error::Timeout { after_ms: 0 });
        }

        tracing::debug!("fetching {}", url);
        let start = Instant::now();

        let outcome = tokio::select! {
            result = tokio::time::timeout(self.options.timeout(), self.get(url)) => {
                match result {
                    Ok(inner) => inner,
                    Err(_) => Err(Error::Timeout { after_ms: timeout_ms }),
                }
            }
            _ = cancel.cancelled() => {
                tracing::warn!("fetch cancelled for {}", url);
                Err(Error::Timeout { after_ms: start.elapsed().as_millis() as u64 })
            }
        };

        match &outcome {
            Ok(page) => tracing::debug!(
                status = page.status,
                bytes = page.bytes.len(),
                duration_ms = page.duration_ms,
                "fetched {}",
                url
            ),
            Err(e) => tracing::debug!("fetch failed for {}: {}", url, e),
        }

        outcome
    }
}

/// Fetch a URL once with the given deadline.
///
/// # Examples
/// ```no_run
/// use sourcing_scrape::tools::fetch::{fetch, FetchOptions};
///
/// # async fn example() -> sourcing_scrape::Result<()> {
/// let page = fetch("https://domeggook.com/12345", &FetchOptions::default()).await?;
/// println!("{} bytes in {}ms", page.bytes.len(), page.duration_ms);
/// # Ok(())
/// # }
/// ```
pub async fn fetch(url: &str, options: &FetchOptions) -> Result<FetchedPage> {
    fetch_with_cancel(url, options, &CancellationToken::new()).await
}

/// Fetch a URL, aborting early when `cancel` fires.
///
/// An aborted fetch reports [`Error::Timeout`], the same as an expired deadline.
pub async fn fetch_with_cancel(
    url: &str,
    options: &FetchOptions,
    cancel: &CancellationToken,
) -> Result<FetchedPage> {
    HttpFetcher::new(options.clone())?.fetch(url, cancel).await
}
