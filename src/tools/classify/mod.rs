//! Classify Tools
//!
//! Decide whether a candidate image URL is a product photo, and make
//! candidate URLs absolute before they are judged.


use url::Url;

/// URLs shorter than this are almost always UI assets.
pub const MIN_IMAGE_URL_LEN: usize = 40;

/// Any of these anywhere in the URL rejects it outright.
const EXCLUDED_TERMS: [&str; 24] = [
    "icon",
    "btn",
    "button",
    "banner",
    "logo",
    "sns",
    "share",
    "facebook",
    "kakao",
    "twitter",
    "instagram",
    "blank.gif",
    "spacer",
    "loading",
    "arrow",
    "bullet",
    "badge",
    "/common/",
    "/layout/",
    "/skin/",
    "/design/",
    "/images/ui/",
    "top_menu",
    "footer",
];

/// Upload folders that only ever hold product photos.
const UPLOAD_PATHS: [&str; 3] = ["upload/item", "upload/product", "upload/goods"];

/// Path fragments that mark a URL as product-related at all.
const PRODUCT_PATHS: [&str; 9] = [
    "upload/item",
    "upload/product",
    "upload/goods",
    "/item/",
    "/items/",
    "/product/",
    "/products/",
    "/goods/",
    "/data/goods",
];

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp"];

/// Outcome of classifying one URL, with the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Excluded(&'static str),
    NotProductPath,
    TooShort,
    NotImage,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Make an image reference absolute.
///
/// - `//host/path` gets an `https:` scheme.
/// - `/path` is resolved against the origin of `base`, when there is one.
/// - Absolute `http(s)` URLs pass through.
/// - Anything else is dropped.
///
/// # Examples
/// ```
/// use sourcing_scrape::tools::classify::normalize_image_url;
/// use url::Url;
///
/// let base = Url::parse("https://shop.example.com/goods/view?no=1").unwrap();
/// assert_eq!(
///     normalize_image_url("//cdn.example.com/a.jpg", Some(&base)).as_deref(),
///     Some("https://cdn.example.com/a.jpg")
/// );
/// assert_eq!(
///     normalize_image_url("/upload/a.jpg", Some(&base)).as_deref(),
///     Some("https://shop.example.com/upload/a.jpg")
/// );
/// assert_eq!(normalize_image_url("/upload/a.jpg", None), None);
/// assert_eq!(normalize_image_url("a.jpg", Some(&base)), None);
/// ```
pub fn normalize_image_url(raw: &str, base: Option<&Url>) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let candidate = if let Some(rest) = raw.strip_prefix("//") {
        Url::parse(&format!("https://{rest}")).ok()?
    } else if raw.starts_with('/') {
        base?.join(raw).ok()?
    } else {
        let lower = raw.to_ascii_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return None;
        }
        Url::parse(raw).ok()?
    };

    match candidate.scheme() {
        "http" | "https" if candidate.host_str().is_some() => Some(candidate.to_string()),
        _ => None,
    }
}

/// Run the classifier rules in order and report which one decided.
pub fn classify_image_url(url: &str) -> Verdict {
    let lower = url.to_ascii_lowercase();

    if let Some(term) = EXCLUDED_TERMS.iter().copied().find(|t| lower.contains(t)) {
        return Verdict::Excluded(term);
    }

    if !PRODUCT_PATHS.iter().any(|p| lower.contains(p)) {
        return Verdict::NotProductPath;
    }

    if url.chars().count() < MIN_IMAGE_URL_LEN {
        return Verdict::TooShort;
    }

    if UPLOAD_PATHS.iter().any(|p| lower.contains(p)) {
        return Verdict::Accepted;
    }

    let path = lower.split(|c: char| c == '?' || c == '#').next().unwrap_or(&lower);
    if IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        Verdict::Accepted
    } else {
        Verdict::NotImage
    }
}

/// `true` when `url` looks like a product photo.
pub fn is_product_image(url: &str) -> bool {
    classify_image_url(url).is_accepted()
}
