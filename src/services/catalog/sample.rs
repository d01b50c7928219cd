use super::mapping::PLACEHOLDER_IMAGE;
use super::types::{CatalogSource, CrawledProduct, ProductMetadata};

const BASE_PRICE: u64 = 10_000;
const PRICE_STEP: u64 = 2_500;

/// Synthetic rows returned in place of a failed upstream search. Every row
/// carries `is_sample` and the failure text.
pub(crate) fn sample_batch(
    keyword: &str,
    source: CatalogSource,
    size: usize,
    error: &str,
) -> Vec<CrawledProduct> {
    let error = if error.trim().is_empty() {
        "unknown error"
    } else {
        error
    };
    let keyword = keyword.trim();

    (0..size.max(1))
        .map(|i| CrawledProduct {
            id: format!("{}_sample_{}", source.key(), i + 1),
            name: format!("[샘플] {} {}", keyword, i + 1),
            price: BASE_PRICE + PRICE_STEP * i as u64,
            image: PLACEHOLDER_IMAGE.to_string(),
            url: source.search_url(keyword),
            supplier: source.label().to_string(),
            category: String::new(),
            stock: String::new(),
            description: format!("{} 검색 결과를 불러오지 못해 표시되는 샘플 상품입니다.", source.label()),
            source,
            metadata: Some(ProductMetadata {
                is_sample: true,
                error: Some(error.to_string()),
                ..ProductMetadata::default()
            }),
        })
        .collect()
}
