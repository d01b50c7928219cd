use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorClass};
use crate::services::catalog::{CatalogSource, CrawledProduct, SearchOptions};

/// Envelope returned by the page-scrape entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorClass>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            kind: None,
        }
    }

    pub fn failure(error: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            kind: Some(error.class()),
        }
    }

    /// HTTP status a web handler should answer with.
    pub fn http_status(&self) -> u16 {
        match (self.success, self.kind) {
            (true, _) => 200,
            (false, Some(kind)) => kind.http_status(),
            (false, None) => 500,
        }
    }
}

impl<T> From<crate::Result<T>> for ApiResponse<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failure(&e),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub keyword: String,
    /// `None` searches every configured source.
    #[serde(default)]
    pub source: Option<CatalogSource>,
    #[serde(flatten)]
    pub options: SearchOptions,
}

/// Envelope returned by the search entry point. `products` is never empty
/// for a valid keyword; failed sources contribute sample rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub products: Vec<CrawledProduct>,
    pub message: String,
    /// Source key, or `"all"`.
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_omits_error_fields() {
        let value = serde_json::to_value(ApiResponse::ok(1)).unwrap();
        assert_eq!(value, json!({ "success": true, "data": 1 }));
    }

    #[test]
    fn failure_envelope_carries_class() {
        let resp = ApiResponse::<()>::failure(&Error::Validation("bad url".into()));
        assert_eq!(resp.http_status(), 400);
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["kind"], json!("bad_request"));
        assert_eq!(value["error"], json!("invalid input: bad url"));
    }

    #[test]
    fn search_request_accepts_flat_filters() {
        let req: SearchRequest = serde_json::from_value(json!({
            "keyword": "텀블러",
            "source": "domeme",
            "page": 2,
            "maxPrice": 20000
        }))
        .unwrap();
        assert_eq!(req.source, Some(CatalogSource::Domeme));
        assert_eq!(req.options.page, 2);
        assert_eq!(req.options.max_price, Some(20_000));
        assert_eq!(req.options.limit, None);
    }
}
