//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for the Open Graph title.
pub static OG_TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[property='og:title'], meta[name='og:title']")
        .expect("valid og:title selector")
});

/// Selector for the Open Graph image.
pub static OG_IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[property='og:image'], meta[name='og:image']")
        .expect("valid og:image selector")
});

/// Selector for the Open Graph description.
pub static OG_DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[property='og:description'], meta[name='og:description']")
        .expect("valid og:description selector")
});

/// Selector for `<title>` tags.
pub static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

/// Selector for `<h1>` tags.
pub static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("valid h1 selector"));

/// Selector for `<body>` elements.
pub static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("valid body selector"));

/// Selector for `<option>` elements inside a `<select>`.
pub static SELECT_OPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("select option").expect("valid option selector"));

/// Compile a static selector list, skipping entries the parser rejects.
pub(crate) fn compile_all(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .filter_map(|s| match Selector::parse(s) {
            Ok(sel) => Some(sel),
            Err(e) => {
                tracing::warn!("skipping invalid selector '{}': {:?}", s, e);
                None
            }
        })
        .collect()
}
