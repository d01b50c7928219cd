use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use super::types::NameTier;
use super::utils::{element_text, meta_content};
use crate::selectors::{compile_all, H1_SELECTOR, OG_TITLE_SELECTOR, TITLE_SELECTOR};
use crate::tools::clean::clean_text;

/// Names this short are site chrome ("홈", "상품"), not product names.
const MIN_NAME_CHARS: usize = 3;
/// Site-selector hits this long are containers, not names.
const MAX_SITE_NAME_CHARS: usize = 300;

/// Class/id names the wholesale marketplaces use for the product name.
const SITE_NAME_SELECTORS: [&str; 14] = [
    "#goods_name",
    ".goods_name",
    ".goods-name",
    "#itemName",
    ".item_name",
    ".item-name",
    ".product_name",
    ".product-name",
    ".prd_name",
    ".prd-name",
    ".tit_goods",
    ".product-title",
    ".item_title",
    ".name",
];

static SITE_NAME_SELECTOR_LIST: Lazy<Vec<Selector>> =
    Lazy::new(|| compile_all(&SITE_NAME_SELECTORS));

static TITLE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\||::|-").expect("valid title separator regex"));

type NameStrategy = fn(&Html) -> Option<String>;

/// Tried in order; the first strategy yielding a usable name wins.
const NAME_STRATEGIES: [(NameTier, NameStrategy); 4] = [
    (NameTier::OgTitle, from_og_title),
    (NameTier::Title, from_title),
    (NameTier::Heading, from_h1),
    (NameTier::SiteSelector, from_site_selectors),
];

pub(super) fn extract_name(doc: &Html) -> Option<(String, NameTier)> {
    NAME_STRATEGIES
        .iter()
        .find_map(|(tier, strategy)| strategy(doc).map(|name| (name, *tier)))
}

fn usable(raw: &str) -> Option<String> {
    let cleaned = clean_text(raw);
    (cleaned.chars().count() > MIN_NAME_CHARS).then_some(cleaned)
}

fn from_og_title(doc: &Html) -> Option<String> {
    meta_content(doc, &OG_TITLE_SELECTOR).and_then(|c| usable(&c))
}

fn from_title(doc: &Html) -> Option<String> {
    let title = doc.select(&TITLE_SELECTOR).next().map(|el| element_text(&el))?;
    let first = TITLE_SEPARATOR.split(&title).next().unwrap_or("");
    usable(first)
}

fn from_h1(doc: &Html) -> Option<String> {
    doc.select(&H1_SELECTOR)
        .next()
        .and_then(|el| usable(&element_text(&el)))
}

fn from_site_selectors(doc: &Html) -> Option<String> {
    SITE_NAME_SELECTOR_LIST.iter().find_map(|sel| {
        doc.select(sel)
            .filter_map(|el| usable(&element_text(&el)))
            .find(|name| name.chars().count() < MAX_SITE_NAME_CHARS)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(html: &str) -> Option<(String, NameTier)> {
        extract_name(&Html::parse_document(html))
    }

    #[test]
    fn og_title_wins_over_everything() {
        let html = r#"<html><head>
            <meta property="og:title" content="   Rose  Bouquet ">
            <title>Other | Shop</title></head>
            <body><h1>Heading Name</h1><div class="goods_name">Site Name</div></body></html>"#;
        assert_eq!(
            name_of(html),
            Some(("Rose Bouquet".to_string(), NameTier::OgTitle))
        );
    }

    #[test]
    fn title_takes_first_segment() {
        for (title, expected) in [
            ("무선 선풍기 대용량 | 도매꾹", "무선 선풍기 대용량"),
            ("Garden Hose 20m - Wholesale Mall", "Garden Hose 20m"),
            ("Steel Tumbler :: 오너클랜", "Steel Tumbler"),
        ] {
            let html = format!("<html><head><title>{title}</title></head><body></body></html>");
            assert_eq!(
                name_of(&html),
                Some((expected.to_string(), NameTier::Title)),
                "title {title:?}"
            );
        }
    }

    #[test]
    fn trivial_og_title_falls_through_to_h1() {
        let html = r#"<html><head><meta property="og:title" content="몰">
            <title>  </title></head><body><h1>
              접이식   캠핑 의자
            </h1></body></html>"#;
        assert_eq!(
            name_of(html),
            Some(("접이식 캠핑 의자".to_string(), NameTier::Heading))
        );
    }

    #[test]
    fn site_selector_respects_length_ceiling() {
        let long = "가".repeat(400);
        let html = format!(
            r#"<html><body><div class="goods_name">{long}</div>
               <span class="item_name">스테인리스 텀블러 500ml</span></body></html>"#
        );
        assert_eq!(
            name_of(&html),
            Some((
                "스테인리스 텀블러 500ml".to_string(),
                NameTier::SiteSelector
            ))
        );
    }

    #[test]
    fn nothing_found_is_none() {
        assert_eq!(name_of("<html><body><p>hi</p></body></html>"), None);
    }
}
