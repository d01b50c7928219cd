use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Bearer token issued by the catalog login endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// A lifetime past the representable range saturates at the latest
    /// representable instant.
    pub fn new(value: String, issued_at: DateTime<Utc>, ttl_secs: i64) -> Self {
        Self {
            value,
            expires_at: offset(issued_at, ttl_secs),
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.value.is_empty() && now < self.expires_at
    }
}

/// Login state shared by every clone of a client.
#[derive(Debug, Default)]
pub(crate) struct Session {
    pub token: Option<SessionToken>,
    /// When the last login attempt failed.
    pub failed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn valid_token(&self, now: DateTime<Utc>) -> Option<&SessionToken> {
        self.token.as_ref().filter(|t| t.is_valid_at(now))
    }

    /// True while a recent failure should suppress another login attempt.
    pub fn in_backoff(&self, now: DateTime<Utc>, retry_secs: i64) -> bool {
        self.failed_at
            .is_some_and(|failed| now < offset(failed, retry_secs))
    }
}

fn offset(at: DateTime<Utc>, secs: i64) -> DateTime<Utc> {
    Duration::try_seconds(secs)
        .and_then(|d| at.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Time source for token expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|now| *now).unwrap_or_else(|e| *e.into_inner())
    }
}
