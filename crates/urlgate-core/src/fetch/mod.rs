//! Page retrieval: one GET per screening, returning the page's visible text.
//!
//! `CurlFetcher` uses the curl crate (libcurl) on tokio's blocking pool,
//! follows redirects, and fails on any non-2xx final status or on a body
//! larger than `FetchConfig::max_body_bytes`.

mod error;
mod extract;

pub use error::{classify_curl_error, FetchError, FetchErrorKind};
pub use extract::extract_visible_text;

use async_trait::async_trait;

use crate::config::FetchConfig;

/// Source of page text for the screener.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its human-visible text (markup stripped).
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// libcurl-backed fetcher.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    config: FetchConfig,
}

impl CurlFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PageFetcher for CurlFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = url.to_string();
        let config = self.config.clone();
        let body = tokio::task::spawn_blocking(move || get_page(&url, &config))
            .await
            .map_err(|e| FetchError::Join(e.to_string()))??;
        Ok(extract_visible_text(&body))
    }
}

/// Performs a blocking GET and returns the response body decoded as UTF-8 (lossy).
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn get_page(url: &str, config: &FetchConfig) -> Result<String, FetchError> {
    let mut body: Vec<u8> = Vec::new();
    let limit = config.max_body_bytes;
    let mut too_large = false;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(config.max_redirections)?;
    easy.connect_timeout(config.connect_timeout())?;
    easy.timeout(config.timeout())?;
    // Let libcurl decode gzip/deflate/br if the server compresses.
    easy.accept_encoding("")?;
    if let Some(ua) = &config.user_agent {
        easy.useragent(ua)?;
    }

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if (body.len() + data.len()) as u64 > limit {
                // Short write makes libcurl abort with CURLE_WRITE_ERROR.
                too_large = true;
                return Ok(0);
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()
    };
    if let Err(e) = performed {
        if too_large {
            tracing::debug!(url, limit, "response body over cap; transfer aborted");
            return Err(FetchError::TooLarge { limit });
        }
        return Err(e.into());
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        tracing::debug!(url, code, "GET returned non-success status");
        return Err(FetchError::Http(code));
    }

    tracing::debug!(url, bytes = body.len(), "GET completed");
    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-process fetchers for unit tests.

    use super::{FetchError, PageFetcher};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns the same text for every URL and counts calls.
    #[derive(Debug, Default)]
    pub(crate) struct StaticFetcher {
        text: String,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        pub(crate) fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }
    }

    /// Always fails with the given HTTP status.
    #[derive(Debug)]
    pub(crate) struct FailingFetcher(pub(crate) u32);

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Err(FetchError::Http(self.0))
        }
    }
}
