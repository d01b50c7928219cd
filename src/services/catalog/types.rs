use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Largest page size the upstream accepts.
pub const MAX_LIMIT: u32 = 100;

/// Upstream wholesale catalogs reachable through the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Domeggook,
    Ownerclan,
    Domeme,
}

impl CatalogSource {
    pub const ALL: [CatalogSource; 3] = [
        CatalogSource::Domeggook,
        CatalogSource::Ownerclan,
        CatalogSource::Domeme,
    ];

    /// Wire key, also used as the id prefix.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Domeggook => "domeggook",
            Self::Ownerclan => "ownerclan",
            Self::Domeme => "domeme",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Domeggook => "도매꾹",
            Self::Ownerclan => "오너클랜",
            Self::Domeme => "도매매",
        }
    }

    /// Site origin used to absolutize relative links in upstream payloads.
    pub fn origin(&self) -> &'static str {
        match self {
            Self::Domeggook => "https://domeggook.com",
            Self::Ownerclan => "https://www.ownerclan.com",
            Self::Domeme => "https://domeme.domeggook.com",
        }
    }

    /// Product page for an upstream id, when the payload carries no link.
    pub fn product_url(&self, raw_id: &str) -> String {
        match self {
            Self::Domeggook => format!("https://domeggook.com/{raw_id}"),
            Self::Ownerclan => {
                format!("https://www.ownerclan.com/V2/product/view.php?selfcode={raw_id}")
            }
            Self::Domeme => format!("https://domeme.domeggook.com/s/{raw_id}"),
        }
    }

    /// Public keyword search page on the source site.
    pub fn search_url(&self, keyword: &str) -> String {
        let (base, param) = match self {
            Self::Domeggook => ("https://domeggook.com/main/item/itemList.php", "sw"),
            Self::Ownerclan => (
                "https://www.ownerclan.com/V2/product/search.php",
                "topSearchKeyword",
            ),
            Self::Domeme => ("https://domeme.domeggook.com/main/item/itemList.php", "sw"),
        };
        Url::parse_with_params(base, &[(param, keyword)])
            .map(|u| u.to_string())
            .unwrap_or_else(|_| base.to_string())
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for CatalogSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|src| src.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Validation(format!("unknown source: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Popular,
    PriceAsc,
    PriceDesc,
    Latest,
}

impl std::str::FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "popular" => Ok(Self::Popular),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "latest" => Ok(Self::Latest),
            other => Err(Error::Validation(format!("unknown sort order: {other}"))),
        }
    }
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Latest => "latest",
        }
    }
}

/// Paging and filters for one search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    pub page: u32,
    /// `None` uses the configured default.
    pub limit: Option<u32>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub sort: Option<SortOrder>,
    pub category: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            min_price: None,
            max_price: None,
            sort: None,
            category: None,
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(Error::Validation("page starts at 1".into()));
        }
        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_LIMIT {
                return Err(Error::Validation(format!(
                    "limit must be between 1 and {MAX_LIMIT}"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(Error::Validation("minPrice exceeds maxPrice".into()));
            }
        }
        Ok(())
    }

    pub(crate) fn accepts_price(&self, price: u64) -> bool {
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

/// Optional extras carried by a catalog row.
///
/// `is_sample` together with `error` marks synthetic fallback rows; such rows
/// are placeholders, never real listings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_order_qty: Option<u64>,
    #[serde(default)]
    pub is_sample: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProductMetadata {
    pub(crate) fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One normalized row from a catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawledProduct {
    /// `<source>_<upstream id>`, unique within a source.
    pub id: String,
    pub name: String,
    pub price: u64,
    pub image: String,
    pub url: String,
    pub supplier: String,
    pub category: String,
    pub stock: String,
    pub description: String,
    pub source: CatalogSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProductMetadata>,
}

impl CrawledProduct {
    pub fn is_sample(&self) -> bool {
        self.metadata.as_ref().is_some_and(|m| m.is_sample)
    }
}
