//! Settings
//!
//! Loaded from `config.json` in the platform config directory, then patched
//! from `SOURCING_*` environment variables. Every section has defaults, so an
//! absent file is not an error.

use crate::error::{Error, Result};
use crate::logging::LoggingConfig;
use crate::services::catalog::CatalogSource;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";

const ENV_CATALOG_URL: &str = "SOURCING_CATALOG_URL";
const ENV_CATALOG_USER: &str = "SOURCING_CATALOG_USER";
const ENV_CATALOG_PASSWORD: &str = "SOURCING_CATALOG_PASSWORD";
/// Upper bound for token lifetimes and retry windows (one year).
const MAX_SESSION_SECS: i64 = 365 * 24 * 3_600;

const ENV_SCRAPE_TIMEOUT_MS: &str = "SOURCING_SCRAPE_TIMEOUT_MS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scrape: ScrapeSettings,
    pub catalog: CatalogSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeSettings {
    pub timeout_ms: u64,
    pub max_images: usize,
    /// Host patterns accepted by the page-scrape entry point. A pattern
    /// matches itself and any subdomain.
    pub allowed_hosts: Vec<String>,
    /// Parallel fetches when scraping several URLs at once.
    pub concurrency: usize,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            max_images: 10,
            allowed_hosts: [
                "domeggook.com",
                "domeme.com",
                "ownerclan.com",
                "onchannel.co.kr",
                "1688.com",
                "coupang.com",
                "smartstore.naver.com",
            ]
            .iter()
            .map(|h| h.to_string())
            .collect(),
            concurrency: 4,
        }
    }
}

impl ScrapeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sources: Vec<CatalogSource>,
    pub token_ttl_secs: i64,
    /// After a failed login, skip further attempts for this long.
    pub login_retry_secs: i64,
    pub timeout_ms: u64,
    pub default_limit: u32,
    /// Rows synthesised per source when the upstream call fails.
    pub sample_size: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.sourcing-hub.kr/v1".to_string(),
            username: None,
            password: None,
            sources: CatalogSource::ALL.to_vec(),
            token_ttl_secs: 3_600,
            login_retry_secs: 60,
            timeout_ms: 15_000,
            default_limit: 20,
            sample_size: 5,
        }
    }
}

impl CatalogSettings {
    pub fn has_credentials(&self) -> bool {
        matches!((&self.username, &self.password), (Some(u), Some(p)) if !u.is_empty() && !p.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Sources to search; every known source when none are configured.
    pub fn effective_sources(&self) -> &[CatalogSource] {
        const ALL: &[CatalogSource] = &CatalogSource::ALL;
        if self.sources.is_empty() {
            ALL
        } else {
            self.sources.as_slice()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::Config("catalog.sources must not be empty".into()));
        }
        if !(1..=MAX_SESSION_SECS).contains(&self.token_ttl_secs) {
            return Err(Error::Config(format!(
                "catalog.token_ttl_secs must be between 1 and {MAX_SESSION_SECS}"
            )));
        }
        if !(0..=MAX_SESSION_SECS).contains(&self.login_retry_secs) {
            return Err(Error::Config(format!(
                "catalog.login_retry_secs must be between 0 and {MAX_SESSION_SECS}"
            )));
        }
        Ok(())
    }
}

impl Settings {
    /// Default config file location, if the platform exposes one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "sourcing", "sourcing_scrape")
            .map(|proj| proj.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location (if present) and apply env overrides.
    pub fn load() -> Result<Self> {
        let mut settings = match Self::default_path() {
            Some(path) if path.exists() => Self::read_file(&path)?,
            _ => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok());
        settings.catalog.validate()?;
        Ok(settings)
    }

    /// Load an explicit file and apply env overrides.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut settings = Self::read_file(path)?;
        settings.apply_env(|key| std::env::var(key).ok());
        settings.catalog.validate()?;
        Ok(settings)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    pub(crate) fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_CATALOG_URL) {
            self.catalog.base_url = url;
        }
        if let Some(user) = lookup(ENV_CATALOG_USER) {
            self.catalog.username = Some(user);
        }
        if let Some(password) = lookup(ENV_CATALOG_PASSWORD) {
            self.catalog.password = Some(password);
        }
        if let Some(ms) = lookup(ENV_SCRAPE_TIMEOUT_MS).and_then(|v| v.trim().parse().ok()) {
            self.scrape.timeout_ms = ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_cover_every_source() {
        let settings = Settings::default();
        assert_eq!(settings.scrape.max_images, 10);
        assert_eq!(settings.scrape.timeout_ms, 15_000);
        assert_eq!(settings.catalog.token_ttl_secs, 3_600);
        assert_eq!(settings.catalog.sources.len(), CatalogSource::ALL.len());
        assert!(!settings.catalog.has_credentials());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "scrape": { "max_images": 4 }, "catalog": { "username": "kim" } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.scrape.max_images, 4);
        assert_eq!(settings.scrape.timeout_ms, 15_000);
        assert_eq!(settings.catalog.username.as_deref(), Some("kim"));
        assert!(!settings.catalog.has_credentials());
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            (ENV_CATALOG_URL, "http://localhost:9000"),
            (ENV_CATALOG_USER, "kim"),
            (ENV_CATALOG_PASSWORD, "secret"),
            (ENV_SCRAPE_TIMEOUT_MS, "2500"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(settings.catalog.base_url, "http://localhost:9000");
        assert!(settings.catalog.has_credentials());
        assert_eq!(settings.scrape.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn catalog_validation_rejects_bad_values() {
        assert!(CatalogSettings::default().validate().is_ok());

        let empty = CatalogSettings {
            sources: Vec::new(),
            ..CatalogSettings::default()
        };
        assert!(matches!(empty.validate(), Err(Error::Config(_))));
        assert_eq!(empty.effective_sources(), CatalogSource::ALL.as_slice());

        let huge_ttl = CatalogSettings {
            token_ttl_secs: i64::MAX,
            ..CatalogSettings::default()
        };
        assert!(matches!(huge_ttl.validate(), Err(Error::Config(_))));

        let negative_retry = CatalogSettings {
            login_retry_secs: -1,
            ..CatalogSettings::default()
        };
        assert!(negative_retry.validate().is_err());
    }

    #[test]
    fn empty_sources_file_is_rejected() {
        let path = std::env::temp_dir().join(format!(
            "sourcing_scrape_empty_sources_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "catalog": { "sources": [] } }"#).unwrap();
        let err = Settings::from_path(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = Settings::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
