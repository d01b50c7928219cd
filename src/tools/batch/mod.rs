//! Batch Tools


use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::tools::extract::{ExtractOptions, ExtractionResult};
use crate::tools::fetch::PageFetcher;
use crate::tools::scrape::scrape_with;
use tokio_util::sync::CancellationToken;

/// Batch execute async operations with bounded concurrency.
///
/// Output order matches input order.
pub async fn batch<T, F, Fut, R>(items: Vec<T>, concurrency: usize, operation: F) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: std::future::Future<Output = R>,
{
    stream::iter(items)
        .map(operation)
        .buffered(concurrency.max(1))
        .collect()
        .await
}

/// Scrape several product pages, at most `concurrency` at a time.
///
/// Each URL succeeds or fails on its own; one bad page never cancels the
/// others. Results are `(url, outcome)` in input order. Firing `cancel`
/// aborts every fetch still in flight.
pub async fn scrape_many(
    fetcher: &dyn PageFetcher,
    urls: Vec<String>,
    options: &ExtractOptions,
    concurrency: usize,
    cancel: &CancellationToken,
) -> Vec<(String, Result<ExtractionResult>)> {
    batch(urls, concurrency, |url| async move {
        let outcome = scrape_with(fetcher, &url, options, cancel).await;
        if let Err(e) = &outcome {
            tracing::warn!("scrape failed for {}: {}", url, e);
        }
        (url, outcome)
    })
    .await
}
