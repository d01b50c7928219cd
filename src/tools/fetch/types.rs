use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Options for a single page fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Whole-request deadline (connect + headers + body).
    pub timeout_ms: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl FetchOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Raw response of a successful fetch.
///
/// Bytes are left undecoded; see [`crate::tools::decode`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    pub bytes: Vec<u8>,
    pub status: u16,
    /// URL after redirects.
    pub final_url: String,
    pub duration_ms: u64,
}
