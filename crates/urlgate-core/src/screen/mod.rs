//! Content screening: does a page's visible text contain any forbidden word?
//!
//! Inputs are validated before any network I/O. The page is fetched once,
//! lower-cased once, and words are tried in the order given; the first word
//! found as a substring decides the verdict.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::error::GateError;
use crate::fetch::PageFetcher;
use crate::word::{is_valid_word, normalize_word};

/// Typed screening request, e.g. as received in a JSON body
/// `{"url": "...", "words": ["...", ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub url: String,
    pub words: Vec<String>,
}

impl SearchRequest {
    pub fn new(url: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            url: url.into(),
            words,
        }
    }

    /// Parse a JSON request body. Malformed JSON or missing fields are `InvalidInput`.
    pub fn from_json(data: &str) -> Result<Self, GateError> {
        serde_json::from_str(data).map_err(|e| GateError::invalid(format!("bad request: {e}")))
    }
}

/// Outcome of one screening call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenVerdict {
    pub matched: bool,
    /// Lower-cased word that matched; empty when `matched` is false.
    pub matched_word: String,
}

impl ScreenVerdict {
    fn found(word: &str) -> Self {
        Self {
            matched: true,
            matched_word: word.to_string(),
        }
    }

    fn clean() -> Self {
        Self {
            matched: false,
            matched_word: String::new(),
        }
    }
}

/// Trimmed URL, or `InvalidInput` if empty or not an absolute http(s) URL.
pub fn validate_url(url: &str) -> Result<&str, GateError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(GateError::invalid("URL cannot be empty"));
    }
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| GateError::invalid(format!("malformed URL '{trimmed}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed),
        other => Err(GateError::invalid(format!(
            "unsupported URL scheme '{other}' in '{trimmed}'"
        ))),
    }
}

/// Normalize every word (trim, lower-case) and check the validity rule.
/// The first offending word, in input order, is reported.
pub fn normalize_words<S: AsRef<str>>(words: &[S]) -> Result<Vec<String>, GateError> {
    if words.is_empty() {
        return Err(GateError::invalid("the list of words is empty"));
    }
    words
        .iter()
        .map(|raw| {
            let word = normalize_word(raw.as_ref());
            if word.is_empty() {
                return Err(GateError::invalid("word cannot be empty"));
            }
            if !is_valid_word(&word) {
                return Err(GateError::invalid(format!("word not valid: {word}")));
            }
            Ok(word)
        })
        .collect()
}

/// First word (input order) contained in `text`. Both sides must already be lower-cased.
pub fn first_match<'a>(text: &str, words: &'a [String]) -> Option<&'a str> {
    words
        .iter()
        .map(String::as_str)
        .find(|word| text.contains(word))
}

/// Screens pages through a `PageFetcher`. Holds no state besides the fetcher.
#[derive(Debug, Clone)]
pub struct ContentScreener<F> {
    fetcher: F,
}

impl<F: PageFetcher> ContentScreener<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch `url` and report the first of `words` found in its visible text.
    pub async fn screen<S: AsRef<str>>(
        &self,
        url: &str,
        words: &[S],
    ) -> Result<ScreenVerdict, GateError> {
        let url = validate_url(url)?;
        let words = normalize_words(words)?;

        let text = self.fetcher.fetch(url).await.map_err(|source| {
            tracing::warn!(url, kind = ?source.kind(), "page fetch failed: {}", source);
            GateError::Fetch {
                url: url.to_string(),
                source,
            }
        })?;
        let text = text.to_lowercase();

        let verdict = match first_match(&text, &words) {
            Some(word) => ScreenVerdict::found(word),
            None => ScreenVerdict::clean(),
        };
        tracing::debug!(
            url,
            words = words.len(),
            matched = verdict.matched,
            word = %verdict.matched_word,
            "screened page"
        );
        Ok(verdict)
    }

    pub async fn screen_request(&self, req: &SearchRequest) -> Result<ScreenVerdict, GateError> {
        self.screen(&req.url, &req.words).await
    }
}
