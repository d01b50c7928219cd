//! Catalog search client
//!
//! Talks to the wholesale catalog API: a cached login token, one search per
//! source, and a sample-row fallback so callers never see an empty failure.

mod mapping;
mod sample;
mod session;
mod types;

pub use mapping::PLACEHOLDER_IMAGE;
pub use session::{Clock, ManualClock, SessionToken, SystemClock};

use session::Session;
pub use types::*;

use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::CatalogSettings;
use crate::error::{Error, Result};
use crate::tools::clean::{first_field, value_as_string};

const TOKEN_KEYS: &[&str] = &["token", "accessToken", "access_token"];

/// Handle to the catalog API. Clones share the HTTP pool and the session.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    settings: Arc<CatalogSettings>,
    session: Arc<Mutex<Session>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.settings.base_url)
            .field("sources", &self.settings.sources)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    pub fn new(settings: CatalogSettings) -> Result<Self> {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: CatalogSettings, clock: Arc<dyn Clock>) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| Error::Internal(format!("failed to build client: {e}")))?;
        Ok(Self {
            http,
            settings: Arc::new(settings),
            session: Arc::new(Mutex::new(Session::default())),
            clock,
        })
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// Current bearer token, logging in when none is cached or it expired.
    ///
    /// Returns an empty string when login fails or no credentials are set.
    /// The session lock is held across the login call, so concurrent callers
    /// share one attempt. After a failure no login is tried again until
    /// `login_retry_secs` have passed.
    pub async fn authenticate(&self) -> String {
        let mut session = self.session.lock().await;
        let now = self.clock.now();

        if let Some(token) = session.valid_token(now) {
            return token.value.clone();
        }
        session.token = None;

        if !self.settings.has_credentials() {
            debug!("no catalog credentials configured, searching anonymously");
            return String::new();
        }
        if session.in_backoff(now, self.settings.login_retry_secs) {
            debug!("recent catalog login failure, searching anonymously");
            return String::new();
        }

        match self.login().await {
            Ok(value) => {
                info!("catalog login succeeded");
                let token = SessionToken::new(value, now, self.settings.token_ttl_secs);
                let value = token.value.clone();
                session.token = Some(token);
                session.failed_at = None;
                value
            }
            Err(e) => {
                warn!("catalog login failed, continuing without a token: {e}");
                session.failed_at = Some(self.clock.now());
                String::new()
            }
        }
    }

    async fn login(&self) -> Result<String> {
        let body = json!({
            "username": self.settings.username.as_deref().unwrap_or_default(),
            "password": self.settings.password.as_deref().unwrap_or_default(),
        });
        let response = self
            .http
            .post(self.endpoint("auth/login"))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus(status.as_u16()));
        }
        let payload: Value = response.json().await?;
        extract_token(&payload).ok_or_else(|| Error::Parse("login response has no token".into()))
    }

    /// Search one source. Any failure becomes a batch of sample rows.
    pub async fn search(
        &self,
        keyword: &str,
        source: CatalogSource,
        options: &SearchOptions,
    ) -> Vec<CrawledProduct> {
        match self.try_search(keyword, source, options).await {
            Ok(products) if !products.is_empty() => {
                debug!(%source, count = products.len(), "catalog search ok");
                products
            }
            Ok(_) => {
                warn!(%source, "catalog search returned no products, using sample rows");
                sample::sample_batch(
                    keyword,
                    source,
                    self.settings.sample_size,
                    "upstream returned no products",
                )
            }
            Err(e) => {
                warn!(%source, "catalog search failed, using sample rows: {e}");
                sample::sample_batch(keyword, source, self.settings.sample_size, &e.to_string())
            }
        }
    }

    /// Upstream search without the sample fallback.
    pub async fn try_search(
        &self,
        keyword: &str,
        source: CatalogSource,
        options: &SearchOptions,
    ) -> Result<Vec<CrawledProduct>> {
        let limit = options.limit.unwrap_or(self.settings.default_limit).clamp(1, MAX_LIMIT);
        let page = options.page.max(1);

        let mut query: Vec<(&str, String)> = vec![
            ("keyword", keyword.trim().to_string()),
            ("source", source.key().to_string()),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(min) = options.min_price {
            query.push(("minPrice", min.to_string()));
        }
        if let Some(max) = options.max_price {
            query.push(("maxPrice", max.to_string()));
        }
        if let Some(sort) = options.sort {
            query.push(("sort", sort.as_str().to_string()));
        }
        if let Some(category) = options.category.as_deref().filter(|c| !c.trim().is_empty()) {
            query.push(("category", category.trim().to_string()));
        }

        let token = self.authenticate().await;
        let mut request = self.http.get(self.endpoint("search")).query(&query);
        if !token.is_empty() {
            request = request.bearer_auth(&token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus(status.as_u16()));
        }
        let payload: Value = response.json().await?;

        let mut products = mapping::map_products(&payload, source, page)?;
        products.retain(|p| options.accepts_price(p.price));
        products.truncate(limit as usize);
        Ok(products)
    }

    /// Search every configured source concurrently and concatenate the
    /// results in source order. A source whose task dies is left out. An
    /// empty source list searches every known source.
    pub async fn search_all(&self, keyword: &str, options: &SearchOptions) -> Vec<CrawledProduct> {
        let handles: Vec<_> = self
            .settings
            .effective_sources()
            .iter()
            .map(|&source| {
                let client = self.clone();
                let keyword = keyword.to_string();
                let options = options.clone();
                let handle =
                    tokio::spawn(async move { client.search(&keyword, source, &options).await });
                (source, handle)
            })
            .collect();

        let mut merged = Vec::new();
        for (source, handle) in handles {
            match handle.await {
                Ok(products) => merged.extend(products),
                Err(e) => warn!(%source, "search task aborted: {e}"),
            }
        }
        merged
    }
}

/// Token may sit at the top level or under `data`.
fn extract_token(payload: &Value) -> Option<String> {
    first_field(payload, TOKEN_KEYS, value_as_string).or_else(|| {
        payload
            .get("data")
            .and_then(|data| first_field(data, TOKEN_KEYS, value_as_string))
    })
}
