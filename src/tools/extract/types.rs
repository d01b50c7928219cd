use serde::{Deserialize, Serialize};

/// Default cap on collected images.
pub const DEFAULT_MAX_IMAGES: usize = 10;
/// Cap on collected purchase options.
pub const MAX_OPTIONS: usize = 20;
/// Cap on the description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
/// Lowest accepted price, inclusive.
pub const MIN_PRICE: u64 = 100;
/// Highest accepted price, exclusive.
pub const MAX_PRICE: u64 = 100_000_000;

/// Structured product record scraped from one page.
///
/// Every field is total: a field that could not be found is the empty
/// string, `0`, or an empty list. A `price` of `0` means the price needs
/// manual entry; it is never a real price.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_url: String,
}

impl ExtractionResult {
    pub fn has_price(&self) -> bool {
        self.price > 0
    }
}

/// Extraction tuning knobs.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOptions {
    pub max_images: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_images: DEFAULT_MAX_IMAGES,
        }
    }
}

/// Where the product name came from.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NameTier {
    OgTitle,
    Title,
    Heading,
    SiteSelector,
}

/// Where the price came from.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    SpecificSelector,
    GenericSelector,
    TextPattern,
}

/// Per-field diagnostics for one extraction.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub name_tier: Option<NameTier>,
    pub price_tier: Option<PriceTier>,
    /// `true` when the first image came from `og:image`.
    pub og_image: bool,
    /// Image candidates seen before the cap was reached.
    pub image_candidates: usize,
    /// Candidates dropped by normalization or the classifier.
    pub images_rejected: usize,
    pub options_skipped: usize,
}
