//! Scrape Tools
//!
//! The page-scrape pipeline: fetch, decode, then extract. A fetch or decode
//! failure aborts the call; extraction itself never fails.

use crate::error::Result;
use crate::tools::decode::decode_html;
use crate::tools::extract::{extract_product_with_report, ExtractOptions, ExtractionResult};
use crate::tools::fetch::{FetchOptions, HttpFetcher, PageFetcher};
use tokio_util::sync::CancellationToken;


/// Fetch `url` through `fetcher` and extract a product record from it.
///
/// Relative image paths resolve against `url` (the requested URL), not the
/// post-redirect location.
pub async fn scrape_with(
    fetcher: &dyn PageFetcher,
    url: &str,
    options: &ExtractOptions,
    cancel: &CancellationToken,
) -> Result<ExtractionResult> {
    let page = fetcher.fetch(url, cancel).await?;
    let html = decode_html(&page.bytes)?;
    let (product, report) = extract_product_with_report(&html, url, options);

    tracing::info!(
        url,
        status = page.status,
        fetch_ms = page.duration_ms,
        name_tier = ?report.name_tier,
        price_tier = ?report.price_tier,
        images = product.images.len(),
        options = product.options.len(),
        description_len = product.description.chars().count(),
        "scraped product page"
    );

    Ok(product)
}

/// Scrape one product page with a fresh HTTP fetcher.
///
/// # Examples
/// ```no_run
/// use sourcing_scrape::tools::extract::ExtractOptions;
/// use sourcing_scrape::tools::fetch::FetchOptions;
/// use sourcing_scrape::tools::scrape::scrape;
///
/// # async fn example() -> sourcing_scrape::Result<()> {
/// let product = scrape(
///     "https://domeggook.com/main/item/itemView.php?aid=12345",
///     &FetchOptions::default(),
///     &ExtractOptions::default(),
/// )
/// .await?;
/// if product.price == 0 {
///     println!("{}: price needs manual entry", product.name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn scrape(
    url: &str,
    fetch_options: &FetchOptions,
    options: &ExtractOptions,
) -> Result<ExtractionResult> {
    let fetcher = HttpFetcher::new(fetch_options.clone())?;
    scrape_with(&fetcher, url, options, &CancellationToken::new()).await
}
