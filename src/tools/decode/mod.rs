//! Decode Tools
//!
//! Target marketplaces are overwhelmingly served in the legacy Korean
//! encoding, so bodies are decoded as EUC-KR first, unconditionally, with no
//! charset sniffing. Only when that strict decode rejects the bytes is UTF-8
//! tried.

use crate::error::{Error, Result};
use encoding_rs::{EUC_KR, UTF_8};

/// Which decoder produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedAs {
    EucKr,
    Utf8,
}

/// Decode a response body into text ready for DOM parsing.
///
/// # Examples
/// ```
/// use sourcing_scrape::tools::decode::decode_html;
///
/// // "상품" in EUC-KR
/// let bytes = [0xBB, 0xF3, 0xC7, 0xB0];
/// assert_eq!(decode_html(&bytes).unwrap(), "상품");
/// ```
pub fn decode_html(bytes: &[u8]) -> Result<String> {
    decode_html_with_source(bytes).map(|(text, _)| text)
}

/// Same as [`decode_html`] but also reports which decoder succeeded.
pub fn decode_html_with_source(bytes: &[u8]) -> Result<(String, DecodedAs)> {
    if let Some(text) = EUC_KR.decode_without_bom_handling_and_without_replacement(bytes) {
        return Ok((text.into_owned(), DecodedAs::EucKr));
    }
    tracing::debug!("EUC-KR decode rejected body, falling back to UTF-8");

    let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match UTF_8.decode_without_bom_handling_and_without_replacement(body) {
        Some(text) => Ok((text.into_owned(), DecodedAs::Utf8)),
        None => Err(Error::Decode),
    }
}
