//! Extract Tools
//!
//! Five independent field extractors over one parsed document. Each field
//! degrades on its own to its empty value; nothing here returns an error.

pub mod types;

mod description;
mod images;
mod name;
mod options;
mod price;
mod utils;

pub use types::*;

use scraper::Html;
use url::Url;

/// Extract a product record from decoded HTML.
///
/// `source_url` is echoed into the result and used as the base for
/// root-relative image paths.
///
/// # Examples
/// ```
/// use sourcing_scrape::tools::extract::{extract_product, ExtractOptions};
///
/// let html = r#"<meta property="og:title" content="   Rose  Bouquet ">"#;
/// let product = extract_product(html, "https://domeggook.com/1", &ExtractOptions::default());
/// assert_eq!(product.name, "Rose Bouquet");
/// assert_eq!(product.price, 0);
/// ```
pub fn extract_product(html: &str, source_url: &str, options: &ExtractOptions) -> ExtractionResult {
    extract_product_with_report(html, source_url, options).0
}

/// Same as [`extract_product`], also returning which tier produced each field.
pub fn extract_product_with_report(
    html: &str,
    source_url: &str,
    options: &ExtractOptions,
) -> (ExtractionResult, ExtractionReport) {
    let doc = Html::parse_document(html);
    extract_document(&doc, source_url, options)
}

/// Run every field extractor against an already parsed document.
pub fn extract_document(
    doc: &Html,
    source_url: &str,
    options: &ExtractOptions,
) -> (ExtractionResult, ExtractionReport) {
    let base = Url::parse(source_url).ok();

    let name = name::extract_name(doc);
    let price = price::extract_price(doc);
    let images = images::extract_images(doc, base.as_ref(), options.max_images);
    let opts = options::extract_options(doc);
    let description = description::extract_description(doc);

    let report = ExtractionReport {
        name_tier: name.as_ref().map(|(_, tier)| *tier),
        price_tier: price.map(|(_, tier)| tier),
        og_image: images.og_image,
        image_candidates: images.candidates,
        images_rejected: images.rejected,
        options_skipped: opts.skipped,
    };

    let result = ExtractionResult {
        name: name.map(|(n, _)| n).unwrap_or_default(),
        price: price.map(|(p, _)| p).unwrap_or(0),
        images: images.images,
        options: opts.options,
        description,
        source_url: source_url.to_string(),
    };

    tracing::debug!(
        url = source_url,
        name_tier = ?report.name_tier,
        price_tier = ?report.price_tier,
        og_image = report.og_image,
        image_candidates = report.image_candidates,
        images_rejected = report.images_rejected,
        options_skipped = report.options_skipped,
        "extraction tiers"
    );
    if !result.has_price() {
        tracing::debug!(url = source_url, "no price found; needs manual entry");
    }

    (result, report)
}
