use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// DNS, connect or body-read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Deadline exceeded or request aborted through its cancellation token.
    #[error("timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("upstream responded with status {0}")]
    UpstreamStatus(u16),

    /// Neither the legacy Korean decoding nor UTF-8 accepted the body.
    #[error("could not decode response body")]
    Decode,

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("malformed upstream payload: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Internal(String),
}

/// Coarse classification handed to callers of the entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    BadRequest,
    Upstream,
    Internal,
}

impl ErrorClass {
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorClass::BadRequest => 400,
            ErrorClass::Upstream => 502,
            ErrorClass::Internal => 500,
        }
    }
}

impl Error {
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Validation(_) => ErrorClass::BadRequest,
            Error::Transport(_)
            | Error::Timeout { .. }
            | Error::UpstreamStatus(_)
            | Error::Decode
            | Error::Parse(_) => ErrorClass::Upstream,
            Error::Config(_) | Error::Internal(_) => ErrorClass::Internal,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}

/* Conversions so `?` works smoothly */
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout { after_ms: 0 }
        } else if e.is_decode() {
            Error::Parse(e.to_string())
        } else if let Some(status) = e.status() {
            Error::UpstreamStatus(status.as_u16())
        } else if e.is_builder() {
            Error::Internal(e.to_string())
        } else {
            Error::Transport(e.to_string())
        }
    }
}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_errors_by_origin() {
        assert_eq!(
            Error::Validation("bad".into()).class(),
            ErrorClass::BadRequest
        );
        assert_eq!(Error::UpstreamStatus(503).class(), ErrorClass::Upstream);
        assert_eq!(Error::Timeout { after_ms: 10 }.class(), ErrorClass::Upstream);
        assert_eq!(Error::Decode.class(), ErrorClass::Upstream);
        assert_eq!(Error::Internal("x".into()).class(), ErrorClass::Internal);
    }

    #[test]
    fn classes_map_to_http_statuses() {
        assert_eq!(ErrorClass::BadRequest.http_status(), 400);
        assert_eq!(ErrorClass::Upstream.http_status(), 502);
        assert_eq!(ErrorClass::Internal.http_status(), 500);
    }

    #[test]
    fn display_includes_status_code() {
        assert_eq!(
            Error::UpstreamStatus(404).to_string(),
            "upstream responded with status 404"
        );
    }
}
