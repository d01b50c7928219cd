use crate::error::Error;
use reqwest::StatusCode;

/// Map a response status to the fetch outcome. Only 2xx passes.
pub(super) fn check_status(status: StatusCode) -> Result<(), Error> {
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::UpstreamStatus(status.as_u16()))
    }
}

/// Map a reqwest failure, stamping timeouts with the configured deadline.
pub(super) fn classify_request_error(e: reqwest::Error, timeout_ms: u64) -> Error {
    if e.is_timeout() {
        return Error::Timeout {
            after_ms: timeout_ms,
        };
    }
    Error::from(e)
}
