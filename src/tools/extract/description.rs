use scraper::Html;

use super::types::DESCRIPTION_MAX_CHARS;
use super::utils::meta_content;
use crate::selectors::OG_DESCRIPTION_SELECTOR;
use crate::tools::clean::truncate_chars;

/// `og:description`, capped. Empty when the page has none.
pub(super) fn extract_description(doc: &Html) -> String {
    meta_content(doc, &OG_DESCRIPTION_SELECTOR)
        .map(|d| truncate_chars(&d, DESCRIPTION_MAX_CHARS))
        .unwrap_or_default()
}
