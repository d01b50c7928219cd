use scraper::Html;

use super::types::MAX_OPTIONS;
use super::utils::element_text;
use crate::selectors::SELECT_OPTION_SELECTOR;
use crate::tools::clean::clean_text;

/// Prompt entries, compared with spaces and decoration removed.
const PLACEHOLDER_LABELS: [&str; 5] = ["선택", "옵션선택", "선택하세요", "옵션을선택하세요", "옵션선택하세요"];

const SOLD_OUT_MARKERS: [&str; 4] = ["품절", "일시품절", "soldout", "sold out"];

#[derive(Debug, Default)]
pub(super) struct OptionHarvest {
    pub options: Vec<String>,
    pub skipped: usize,
}

pub(super) fn extract_options(doc: &Html) -> OptionHarvest {
    let mut skipped = 0;
    let mut accepted = Vec::new();

    for el in doc.select(&SELECT_OPTION_SELECTOR) {
        let text = clean_text(&element_text(&el));
        let empty_value = el
            .value()
            .attr("value")
            .map(|v| matches!(v.trim(), "" | "0"))
            .unwrap_or(false);

        if text.is_empty() || empty_value || is_placeholder(&text) || is_sold_out(&text) {
            skipped += 1;
            continue;
        }
        accepted.push(text);
    }

    OptionHarvest {
        options: crate::dedupe!(accepted, max = MAX_OPTIONS),
        skipped,
    }
}

fn is_placeholder(text: &str) -> bool {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '=' | '*' | '[' | ']' | '(' | ')' | ':'))
        .collect();
    PLACEHOLDER_LABELS.contains(&compact.as_str())
}

fn is_sold_out(text: &str) -> bool {
    let lower = text.to_lowercase();
    SOLD_OUT_MARKERS.iter().any(|m| lower.contains(m))
}
