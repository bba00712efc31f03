//! Page fetch error type and classification.

/// Failure of a single page GET. Never retried by the core.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, bad URL, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Final response (after redirects) had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Response body exceeded the configured cap; the transfer was aborted.
    #[error("response body exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    /// The blocking fetch task panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    Join(String),
}

/// Coarse failure category, used for logging and status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Timeout,
    Connection,
    HttpStatus(u16),
    Other,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Curl(e) => classify_curl_error(e),
            FetchError::Http(code) => FetchErrorKind::HttpStatus(*code as u16),
            FetchError::TooLarge { .. } | FetchError::Join(_) => FetchErrorKind::Other,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == FetchErrorKind::Timeout
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FetchErrorKind {
    if e.is_operation_timedout() {
        return FetchErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_ssl_connect_error()
    {
        return FetchErrorKind::Connection;
    }
    FetchErrorKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_kind_carries_code() {
        assert_eq!(FetchError::Http(404).kind(), FetchErrorKind::HttpStatus(404));
        assert_eq!(FetchError::Http(503).kind(), FetchErrorKind::HttpStatus(503));
        assert!(!FetchError::Http(504).is_timeout());
    }

    #[test]
    fn curl_timeout_and_connect_classified() {
        // CURLE_OPERATION_TIMEDOUT = 28, CURLE_COULDNT_CONNECT = 7
        let timeout = FetchError::Curl(curl::Error::new(28));
        assert_eq!(timeout.kind(), FetchErrorKind::Timeout);
        assert!(timeout.is_timeout());
        let refused = FetchError::Curl(curl::Error::new(7));
        assert_eq!(refused.kind(), FetchErrorKind::Connection);
    }

    #[test]
    fn display_messages() {
        assert_eq!(FetchError::Http(500).to_string(), "HTTP 500");
        assert_eq!(
            FetchError::TooLarge { limit: 1024 }.to_string(),
            "response body exceeds 1024 bytes"
        );
        assert_eq!(FetchError::TooLarge { limit: 1 }.kind(), FetchErrorKind::Other);
        assert!(FetchError::Join("panicked".into())
            .to_string()
            .contains("panicked"));
    }
}
