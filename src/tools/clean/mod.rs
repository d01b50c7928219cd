//! Clean Tools
//!
//! Text and number coercion shared by the page extractors and the catalog
//! mapper.

mod tests;
mod utils;

pub(crate) use utils::*;

/// Clean a text fragment scraped from a page.
///
/// Performs the following operations in order:
/// 1. Remove zero-width characters
/// 2. Remove control characters other than whitespace
/// 3. Collapse whitespace runs to one space and trim
///
/// # Examples
/// ```
/// use sourcing_scrape::tools::clean::clean_text;
///
/// assert_eq!(clean_text("  Rose \n\t Bouquet\u{200B} "), "Rose Bouquet");
/// ```
pub fn clean_text(text: &str) -> String {
    let result = remove_zero_width_chars(text);
    let result = remove_control_chars(&result);
    normalize_whitespace(&result)
}

/// Strip every non-digit and parse what remains.
///
/// Returns `None` when no digits are present or the number overflows.
///
/// # Examples
/// ```
/// use sourcing_scrape::tools::clean::parse_digits;
///
/// assert_eq!(parse_digits("공급가 12,000원"), Some(12000));
/// assert_eq!(parse_digits("문의"), None);
/// ```
pub fn parse_digits(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Truncate to at most `max` characters (not bytes).
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
