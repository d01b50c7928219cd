//! Entry points handed to callers such as a web handler or the CLI.

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use url::Url;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::services::catalog::CatalogClient;
use crate::tools::batch::batch;
use crate::tools::extract::{ExtractOptions, ExtractionResult};
use crate::tools::fetch::{FetchOptions, HttpFetcher, PageFetcher};
use crate::tools::scrape::scrape_with;
use crate::types::{ApiResponse, ScrapeRequest, SearchRequest, SearchResponse};

/// Longest keyword forwarded to the catalog.
pub const MAX_KEYWORD_CHARS: usize = 100;

/* ------------ public facade components ------------ */

pub struct Components {
    pub settings: Settings,
    pub fetcher: Box<dyn PageFetcher>,
    pub catalog: CatalogClient,
}

impl Components {
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let fetcher = HttpFetcher::new(FetchOptions::with_timeout(settings.scrape.timeout()))?;
        let catalog = CatalogClient::new(settings.catalog.clone())?;
        Ok(Self {
            settings,
            fetcher: Box::new(fetcher),
            catalog,
        })
    }

    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            max_images: self.settings.scrape.max_images,
        }
    }
}

/* ------------ validation helpers ------------ */

fn canonical_host(host: &str) -> String {
    let lower = host.trim().trim_end_matches('.').to_ascii_lowercase();
    idna::domain_to_ascii(&lower).unwrap_or(lower)
}

/// True when `host` equals a pattern or is a subdomain of one. A leading
/// `*.` on a pattern is accepted and ignored.
pub fn host_allowed(host: &str, patterns: &[String]) -> bool {
    let host = canonical_host(host);
    patterns.iter().any(|pattern| {
        let pattern = canonical_host(pattern.trim_start_matches("*.").trim_start_matches('.'));
        !pattern.is_empty()
            && (host == pattern
                || host
                    .strip_suffix(pattern.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.')))
    })
}

/// Parse a scrape target and check it against the allow-list.
pub fn validate_scrape_url(raw: &str, allowed_hosts: &[String]) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Validation(format!("malformed url '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Validation(format!(
            "unsupported scheme '{}'",
            url.scheme()
        )));
    }
    let host = url
        .host_str()
        .ok_or_else(|| Error::Validation(format!("url has no host: {raw}")))?;
    if !host_allowed(host, allowed_hosts) {
        return Err(Error::Validation(format!("host not allowed: {host}")));
    }
    Ok(url)
}

/// Trim a search keyword and bound its length.
pub fn validate_keyword(raw: &str) -> Result<String> {
    let keyword = raw.trim();
    if keyword.is_empty() {
        return Err(Error::Validation("keyword is empty".into()));
    }
    if keyword.chars().count() > MAX_KEYWORD_CHARS {
        return Err(Error::Validation(format!(
            "keyword longer than {MAX_KEYWORD_CHARS} characters"
        )));
    }
    Ok(keyword.to_string())
}

/* ------------ page scrape ------------ */

/// Scrape one allow-listed product page.
pub async fn scrape_product(
    components: &Components,
    request: ScrapeRequest,
) -> ApiResponse<ExtractionResult> {
    let url = match validate_scrape_url(&request.url, &components.settings.scrape.allowed_hosts) {
        Ok(url) => url,
        Err(e) => return ApiResponse::failure(&e),
    };
    let result = scrape_with(
        components.fetcher.as_ref(),
        url.as_str(),
        &components.extract_options(),
        &CancellationToken::new(),
    )
    .await;
    ApiResponse::from(result)
}

/// Scrape several pages with the configured concurrency. One response per
/// URL, in input order.
pub async fn scrape_products(
    components: &Components,
    urls: Vec<String>,
) -> Vec<ApiResponse<ExtractionResult>> {
    batch(urls, components.settings.scrape.concurrency, |url| {
        scrape_product(components, ScrapeRequest { url })
    })
    .await
}

/* ------------ catalog search ------------ */

/// Search one source or all of them. Fails only on invalid input; upstream
/// trouble shows up as sample rows.
pub async fn search_products(
    components: &Components,
    request: SearchRequest,
) -> Result<SearchResponse> {
    let keyword = validate_keyword(&request.keyword)?;
    request.options.validate()?;

    let (products, source) = match request.source {
        Some(source) => (
            components
                .catalog
                .search(&keyword, source, &request.options)
                .await,
            source.key().to_string(),
        ),
        None => (
            components.catalog.search_all(&keyword, &request.options).await,
            "all".to_string(),
        ),
    };

    let samples = products.iter().filter(|p| p.is_sample()).count();
    let message = if samples == 0 {
        format!("{} products found for '{keyword}'", products.len())
    } else {
        format!(
            "{} products found for '{keyword}' ({samples} sample rows from unavailable sources)",
            products.len()
        )
    };
    info!(
        keyword = %keyword,
        source = %source,
        total = products.len(),
        samples,
        "catalog search done"
    );

    Ok(SearchResponse {
        success: true,
        products,
        message,
        source,
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::{CatalogSource, SearchOptions};
    use crate::tools::fetch::FetchedPage;
    use async_trait::async_trait;

    struct FixedPage(&'static str);

    #[async_trait]
    impl PageFetcher for FixedPage {
        async fn fetch(&self, url: &str, _cancel: &CancellationToken) -> Result<FetchedPage> {
            Ok(FetchedPage {
                bytes: self.0.as_bytes().to_vec(),
                status: 200,
                final_url: url.to_string(),
                duration_ms: 1,
            })
        }
    }

    fn components(page: &'static str, settings: Settings) -> Components {
        Components {
            catalog: CatalogClient::new(settings.catalog.clone()).unwrap(),
            settings,
            fetcher: Box::new(FixedPage(page)),
        }
    }

    fn hosts(list: &[&str]) -> Vec<String> {
        list.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn host_matching_accepts_subdomains_only() {
        let allowed = hosts(&["domeggook.com", "*.coupang.com"]);
        assert!(host_allowed("domeggook.com", &allowed));
        assert!(host_allowed("www.Domeggook.com", &allowed));
        assert!(host_allowed("m.coupang.com", &allowed));
        assert!(!host_allowed("notdomeggook.com", &allowed));
        assert!(!host_allowed("domeggook.com.evil.io", &allowed));
    }

    #[test]
    fn host_matching_canonicalises_idn() {
        let allowed = hosts(&["도매.kr"]);
        assert!(host_allowed("xn--hq1b59i.kr", &allowed));
        assert!(host_allowed("shop.도매.kr", &allowed));
    }

    #[test]
    fn url_validation_rejects_bad_input() {
        let allowed = hosts(&["domeggook.com"]);
        assert!(validate_scrape_url("https://domeggook.com/12345", &allowed).is_ok());
        for bad in [
            "not a url",
            "ftp://domeggook.com/x",
            "https://example.com/item",
            "file:///etc/passwd",
        ] {
            let err = validate_scrape_url(bad, &allowed).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{bad}");
        }
    }

    #[test]
    fn keyword_validation() {
        assert_eq!(validate_keyword("  텀블러 ").unwrap(), "텀블러");
        assert!(validate_keyword("   ").is_err());
        assert!(validate_keyword(&"가".repeat(MAX_KEYWORD_CHARS + 1)).is_err());
    }

    #[tokio::test]
    async fn scrape_rejects_disallowed_host_as_bad_request() {
        let components = components("<html></html>", Settings::default());
        let resp = scrape_product(
            &components,
            ScrapeRequest {
                url: "https://example.com/goods/1".into(),
            },
        )
        .await;
        assert!(!resp.success);
        assert_eq!(resp.http_status(), 400);
    }

    #[tokio::test]
    async fn scrape_returns_extraction_for_allowed_host() {
        let page = r#"<html><head><meta property="og:title" content="Rose Bouquet"></head>
            <body><span class="price">25,000</span></body></html>"#;
        let components = components(page, Settings::default());
        let resp = scrape_product(
            &components,
            ScrapeRequest {
                url: "https://domeggook.com/12345".into(),
            },
        )
        .await;
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data.name, "Rose Bouquet");
        assert_eq!(data.price, 25_000);
        assert_eq!(data.source_url, "https://domeggook.com/12345");
    }

    #[tokio::test]
    async fn scrape_products_keeps_input_order() {
        let components = components(
            "<html><title>Stainless Tumbler</title></html>",
            Settings::default(),
        );
        let responses = scrape_products(
            &components,
            vec![
                "https://domeggook.com/1".into(),
                "https://example.com/2".into(),
                "https://www.ownerclan.com/3".into(),
            ],
        )
        .await;
        let flags: Vec<bool> = responses.iter().map(|r| r.success).collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[tokio::test]
    async fn search_rejects_empty_keyword() {
        let components = components("", Settings::default());
        let err = search_products(
            &components,
            SearchRequest {
                keyword: "  ".into(),
                source: None,
                options: SearchOptions::default(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.class(), crate::error::ErrorClass::BadRequest);
    }

    #[tokio::test]
    async fn search_degrades_to_samples_when_catalog_unreachable() {
        let mut settings = Settings::default();
        settings.catalog.base_url = "http://127.0.0.1:9".into();
        settings.catalog.timeout_ms = 500;
        let components = components("", settings);

        let resp = search_products(
            &components,
            SearchRequest {
                keyword: "텀블러".into(),
                source: Some(CatalogSource::Domeggook),
                options: SearchOptions::default(),
            },
        )
        .await
        .unwrap();

        assert!(resp.success);
        assert_eq!(resp.source, "domeggook");
        assert!(!resp.products.is_empty());
        assert!(resp.products.iter().all(|p| p.is_sample()));
        assert!(resp.message.contains("sample"));
    }
}
