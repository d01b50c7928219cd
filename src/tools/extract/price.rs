use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::types::{PriceTier, MAX_PRICE, MIN_PRICE};
use super::utils::{element_text, visible_text};
use crate::selectors::compile_all;
use crate::tools::clean::parse_digits;

/// Ids/classes that almost always hold the price and nothing else.
const SPECIFIC_PRICE_SELECTORS: [&str; 16] = [
    "#supply_price",
    ".supply_price",
    "#supplyPrice",
    ".price_supply",
    "#sale_price",
    ".sale_price",
    "#salePrice",
    "#goods_price",
    ".goods_price",
    "#item_price",
    ".item_price",
    "#price",
    "#lInfoAmt",
    "input[name='price']",
    "input[name='goods_price']",
    "[data-price]",
];

/// Looser patterns tried when none of the specific ones produced a price.
const GENERIC_PRICE_SELECTORS: [&str; 7] = [
    "[class*='price']",
    "[class*='Price']",
    "[id*='price']",
    "[id*='Price']",
    "[class*='amount']",
    ".cost",
    "strong.num",
];

/// Attributes probed when an element's text holds no valid price.
const PRICE_ATTRIBUTES: [&str; 3] = ["value", "data-price", "data-value"];

static SPECIFIC_PRICE_SELECTOR_LIST: Lazy<Vec<Selector>> =
    Lazy::new(|| compile_all(&SPECIFIC_PRICE_SELECTORS));
static GENERIC_PRICE_SELECTOR_LIST: Lazy<Vec<Selector>> =
    Lazy::new(|| compile_all(&GENERIC_PRICE_SELECTORS));

/// Korean price phrasing, most specific first. Group 1 is the amount.
static PRICE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:공급가격|공급가|도매가격|도매가)\s*[:：]?\s*([0-9][0-9,]*)\s*원",
        r"(?:판매가격|판매가|소비자가|할인가|가격)\s*[:：]?\s*([0-9][0-9,]*)\s*원",
        r"([0-9]{1,3}(?:,[0-9]{3})+)\s*원",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid price regex"))
    .collect()
});

type PriceStrategy = fn(&Html) -> Option<u64>;

/// Tried in order; each runs only when the previous found nothing valid.
const PRICE_STRATEGIES: [(PriceTier, PriceStrategy); 3] = [
    (PriceTier::SpecificSelector, from_specific_selectors),
    (PriceTier::GenericSelector, from_generic_selectors),
    (PriceTier::TextPattern, from_text_patterns),
];

pub(super) fn extract_price(doc: &Html) -> Option<(u64, PriceTier)> {
    PRICE_STRATEGIES
        .iter()
        .find_map(|(tier, strategy)| strategy(doc).map(|price| (price, *tier)))
}

/// Price band check. Anything outside is a phone number, a stock count,
/// or a concatenation of several numbers.
fn in_price_band(value: u64) -> bool {
    (MIN_PRICE..MAX_PRICE).contains(&value)
}

fn valid_price(text: &str) -> Option<u64> {
    parse_digits(text).filter(|v| in_price_band(*v))
}

fn price_from_element(el: &ElementRef) -> Option<u64> {
    valid_price(&element_text(el)).or_else(|| {
        PRICE_ATTRIBUTES
            .iter()
            .filter_map(|attr| el.value().attr(attr))
            .find_map(valid_price)
    })
}

fn from_selectors(doc: &Html, selectors: &[Selector]) -> Option<u64> {
    selectors
        .iter()
        .find_map(|sel| doc.select(sel).find_map(|el| price_from_element(&el)))
}

fn from_specific_selectors(doc: &Html) -> Option<u64> {
    from_selectors(doc, &SPECIFIC_PRICE_SELECTOR_LIST)
}

fn from_generic_selectors(doc: &Html) -> Option<u64> {
    from_selectors(doc, &GENERIC_PRICE_SELECTOR_LIST)
}

fn from_text_patterns(doc: &Html) -> Option<u64> {
    price_from_text(&visible_text(doc))
}

/// Scan free text for a price phrase. Out-of-band matches are skipped.
fn price_from_text(text: &str) -> Option<u64> {
    PRICE_PATTERNS.iter().find_map(|re| {
        re.captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .find_map(|m| valid_price(m.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price_of(html: &str) -> Option<(u64, PriceTier)> {
        extract_price(&Html::parse_document(html))
    }

    #[test]
    fn specific_selector_text() {
        let html = r#"<div id="supply_price"><strong>12,500</strong>원</div>"#;
        assert_eq!(price_of(html), Some((12_500, PriceTier::SpecificSelector)));
    }

    #[test]
    fn specific_selector_attribute_probe() {
        let html = r#"<form><input name="price" type="hidden" value="8900"></form>"#;
        assert_eq!(price_of(html), Some((8_900, PriceTier::SpecificSelector)));

        let html = r#"<span data-price="15000">가격 문의</span>"#;
        assert_eq!(price_of(html), Some((15_000, PriceTier::SpecificSelector)));
    }

    #[test]
    fn generic_selector_when_specific_missing() {
        let html = r#"<p class="detail-price-box">₩ 33,000</p>"#;
        assert_eq!(price_of(html), Some((33_000, PriceTier::GenericSelector)));
    }

    #[test]
    fn out_of_band_selector_value_escalates() {
        // 50 is below the band, so the regex tier decides.
        let html = r#"<html><body><span id="price">50</span>
            <p>판매가 7,800원</p></body></html>"#;
        assert_eq!(price_of(html), Some((7_800, PriceTier::TextPattern)));
    }

    #[test]
    fn text_patterns_table() {
        let cases: [(&str, Option<u64>); 9] = [
            ("공급가: 12,000원", Some(12_000)),
            ("공급가 12000 원", Some(12_000)),
            ("도매가：3,300원", Some(3_300)),
            ("판매가 12,000원", Some(12_000)),
            ("오늘만 19,900원!", Some(19_900)),
            ("배송비 50원 그리고 1,500원", Some(1_500)),
            ("공급가: 50원 판매가: 2,000원", Some(2_000)),
            ("총 100,000,000원", None),
            ("가격 문의", None),
        ];
        for (text, expected) in cases {
            assert_eq!(price_from_text(text), expected, "text {text:?}");
        }
    }

    #[test]
    fn band_edges() {
        assert!(!in_price_band(99));
        assert!(in_price_band(100));
        assert!(in_price_band(99_999_999));
        assert!(!in_price_band(100_000_000));
    }

    #[test]
    fn scripts_are_not_searched() {
        let html = r#"<html><body><script>var p = "45,000원";</script><p>상품 설명</p></body></html>"#;
        assert_eq!(price_of(html), None);
    }

    #[test]
    fn exhausted_strategies_yield_none() {
        let html = r#"<html><body><div class="price">0</div><p>연락 주세요</p></body></html>"#;
        assert_eq!(price_of(html), None);
    }
}
