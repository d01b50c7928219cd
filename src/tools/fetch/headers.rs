use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Desktop Chrome header set, Korean locale first. Accept-Encoding is left
/// to reqwest so bodies are still decompressed transparently.
pub(crate) fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (k, v) in header_pairs() {
        let name = HeaderName::from_lowercase(k.to_ascii_lowercase().as_bytes())
            .unwrap_or_else(|_| HeaderName::from_static("accept"));
        if let Ok(val) = HeaderValue::from_str(v) {
            headers.insert(name, val);
        }
    }

    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

    headers
}

/// Header pairs without User-Agent.
fn header_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"),
        ("Accept-Language", "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
        ("Connection", "keep-alive"),
        ("Upgrade-Insecure-Requests", "1"),
        ("Sec-Fetch-Dest", "document"),
        ("Sec-Fetch-Mode", "navigate"),
        ("Sec-Fetch-Site", "none"),
        ("Sec-Ch-Ua-Mobile", "?0"),
        ("Sec-Ch-Ua-Platform", "\"Windows\""),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_browser_identity() {
        let headers = browser_headers();
        assert!(headers.contains_key("user-agent"));
        assert!(headers.contains_key("accept"));
        assert!(headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ua| ua.starts_with("Mozilla/5.0")));
    }

    #[test]
    fn prefers_korean_locale() {
        let headers = browser_headers();
        assert_eq!(
            headers
                .get("accept-language")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.starts_with("ko-KR")),
            Some(true)
        );
    }
}
