use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use super::utils::meta_content;
use crate::selectors::{compile_all, OG_IMAGE_SELECTOR};
use crate::tools::classify::{classify_image_url, normalize_image_url};

/// Gallery/detail containers first, then generic path patterns.
const IMAGE_SELECTORS: [&str; 16] = [
    ".detail_img img",
    ".goods_img img",
    ".item_img img",
    ".product_img img",
    ".prd_img img",
    "#goods_view img",
    ".thumb img",
    ".gallery img",
    ".swiper-slide img",
    "#detail img",
    ".detail img",
    "img[src*='upload']",
    "img[src*='goods']",
    "img[src*='product']",
    "img[src*='item']",
    "img[data-src]",
];

/// Attributes holding the image source, lazy-loading ones last.
const IMAGE_SOURCE_ATTRS: [&str; 4] = ["src", "data-src", "data-original", "data-lazy"];

static IMAGE_SELECTOR_LIST: Lazy<Vec<Selector>> = Lazy::new(|| compile_all(&IMAGE_SELECTORS));

#[derive(Debug, Default)]
pub(super) struct ImageHarvest {
    pub images: Vec<String>,
    pub og_image: bool,
    pub candidates: usize,
    pub rejected: usize,
}

impl ImageHarvest {
    fn full(&self, max: usize) -> bool {
        self.images.len() >= max
    }

    /// Normalize, classify and keep `raw`. Returns `true` if it was kept.
    fn offer(&mut self, raw: &str, base: Option<&Url>, seen: &mut HashSet<String>) -> bool {
        self.candidates += 1;
        let Some(url) = normalize_image_url(raw, base) else {
            self.rejected += 1;
            return false;
        };
        let verdict = classify_image_url(&url);
        if !verdict.is_accepted() {
            tracing::trace!(?verdict, "rejected image {}", url);
            self.rejected += 1;
            return false;
        }
        if !seen.insert(url.clone()) {
            return false;
        }
        self.images.push(url);
        true
    }
}

pub(super) fn extract_images(doc: &Html, base: Option<&Url>, max: usize) -> ImageHarvest {
    let mut harvest = ImageHarvest::default();
    let mut seen = HashSet::new();
    if max == 0 {
        return harvest;
    }

    if let Some(og) = meta_content(doc, &OG_IMAGE_SELECTOR) {
        harvest.og_image = harvest.offer(&og, base, &mut seen);
    }

    'selectors: for sel in IMAGE_SELECTOR_LIST.iter() {
        for el in doc.select(sel) {
            if harvest.full(max) {
                break 'selectors;
            }
            if el.value().name() != "img" {
                continue;
            }
            let source = IMAGE_SOURCE_ATTRS
                .iter()
                .filter_map(|attr| el.value().attr(attr))
                .map(str::trim)
                .find(|v| !v.is_empty());
            if let Some(raw) = source {
                harvest.offer(raw, base, &mut seen);
            }
        }
    }

    harvest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://shop.example.co.kr/goods/view.php?no=77").unwrap()
    }

    fn images_of(html: &str, max: usize) -> ImageHarvest {
        extract_images(&Html::parse_document(html), Some(&base()), max)
    }

    #[test]
    fn detail_container_image_is_normalized() {
        let html = r#"<div class="detail_img">
            <img src="//cdn.site.com/upload/item/12345_detail.jpg"></div>"#;
        let harvest = images_of(html, 10);
        assert_eq!(
            harvest.images,
            vec!["https://cdn.site.com/upload/item/12345_detail.jpg".to_string()]
        );
    }

    #[test]
    fn og_image_comes_first() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://img.example.co.kr/upload/goods/main_0001.jpg">
            </head><body><div class="goods_img">
            <img src="/upload/goods/sub_0002.jpg"></div></body></html>"#;
        let harvest = images_of(html, 10);
        assert!(harvest.og_image);
        assert_eq!(
            harvest.images,
            vec![
                "https://img.example.co.kr/upload/goods/main_0001.jpg".to_string(),
                "https://shop.example.co.kr/upload/goods/sub_0002.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn lazy_attributes_are_used_in_priority_order() {
        let html = r#"<div class="thumb">
            <img data-original="https://img.example.co.kr/upload/item/lazy_orig.jpg"
                 data-lazy="https://img.example.co.kr/upload/item/lazy_late.jpg">
            <img src="" data-src="https://img.example.co.kr/upload/item/lazy_src.jpg">
            </div>"#;
        let harvest = images_of(html, 10);
        assert_eq!(
            harvest.images,
            vec![
                "https://img.example.co.kr/upload/item/lazy_orig.jpg".to_string(),
                "https://img.example.co.kr/upload/item/lazy_src.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn duplicates_and_chrome_are_dropped() {
        let html = r#"<div class="detail">
            <img src="https://img.example.co.kr/upload/goods/a_000001.jpg">
            <img src="https://img.example.co.kr/upload/goods/a_000001.jpg">
            <img src="https://img.example.co.kr/upload/goods/icon_new_000.gif">
            <img src="images/relative.jpg">
            </div>"#;
        let harvest = images_of(html, 10);
        assert_eq!(harvest.images.len(), 1);
        assert!(harvest.rejected >= 2);
    }

    #[test]
    fn stops_at_cap() {
        let imgs: String = (0..30)
            .map(|i| format!(r#"<img src="https://img.example.co.kr/upload/goods/photo_{i:04}.jpg">"#))
            .collect();
        let html = format!(r#"<div class="gallery">{imgs}</div>"#);
        assert_eq!(images_of(&html, 10).images.len(), 10);
        assert_eq!(images_of(&html, 3).images.len(), 3);
        assert!(images_of(&html, 0).images.is_empty());
    }
}
