//! Admission of screened URLs into the registry.
//!
//! `admit` applies the tri-state create policy:
//!
//! | entry exists | word found | result              | writes |
//! |--------------|------------|---------------------|--------|
//! | no           | yes        | `Rejected`          | none   |
//! | no           | no         | `Created`           | 1 row  |
//! | yes          | yes        | `ConflictRejected`  | none   |
//! | yes          | no         | `ConflictExists`    | none   |
//!
//! Creation is write-once per URL. The insert relies on the registry's
//! unique key, so when two admissions of the same URL race past the
//! existence check, the loser gets `DuplicateKey` and reports
//! `ConflictExists`.

use serde::Serialize;

use crate::error::{GateError, ResultCode};
use crate::fetch::PageFetcher;
use crate::registry::{Entry, Registry, RegistryError};
use crate::screen::{ContentScreener, ScreenVerdict, SearchRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionResult {
    Created,
    Rejected,
    ConflictExists,
    ConflictRejected,
}

impl AdmissionResult {
    pub fn code(self) -> ResultCode {
        match self {
            AdmissionResult::Created => ResultCode::Created,
            AdmissionResult::Rejected => ResultCode::Rejected,
            AdmissionResult::ConflictExists => ResultCode::ConflictExists,
            AdmissionResult::ConflictRejected => ResultCode::ConflictRejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemovalResult {
    Removed,
    NotFound,
}

impl RemovalResult {
    pub fn code(self) -> ResultCode {
        match self {
            RemovalResult::Removed => ResultCode::Removed,
            RemovalResult::NotFound => ResultCode::NotFound,
        }
    }
}

/// Verdict and admission result of a full check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub url: String,
    pub verdict: ScreenVerdict,
    pub result: AdmissionResult,
}

/// Registry key for a caller-supplied URL: trimmed, non-empty.
fn registry_key(url: &str) -> Result<&str, GateError> {
    let key = url.trim();
    if key.is_empty() {
        return Err(GateError::invalid("URL cannot be empty"));
    }
    Ok(key)
}

/// Applies admission policy on top of a registry and a screener.
pub struct AdmissionController<R, F> {
    registry: R,
    screener: ContentScreener<F>,
}

impl<R: Registry, F: PageFetcher> AdmissionController<R, F> {
    pub fn new(registry: R, screener: ContentScreener<F>) -> Self {
        Self { registry, screener }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn screener(&self) -> &ContentScreener<F> {
        &self.screener
    }

    /// Decide whether `url` enters the registry given a screening outcome
    /// (`rejected` = a forbidden word was found).
    pub async fn admit(&self, url: &str, rejected: bool) -> Result<AdmissionResult, GateError> {
        let key = registry_key(url)?;

        let exists = self
            .registry
            .exists(key)
            .await
            .map_err(|e| GateError::storage("exists", key, e))?;

        let result = match (exists, rejected) {
            (true, true) => AdmissionResult::ConflictRejected,
            (true, false) => AdmissionResult::ConflictExists,
            (false, true) => AdmissionResult::Rejected,
            (false, false) => match self.registry.insert(&Entry::new_authorized(key)).await {
                Ok(()) => AdmissionResult::Created,
                Err(RegistryError::DuplicateKey(_)) => {
                    tracing::debug!(url = key, "lost admission race; entry already created");
                    AdmissionResult::ConflictExists
                }
                Err(e) => return Err(GateError::storage("insert", key, e)),
            },
        };

        tracing::info!(url = key, rejected, result = %result.code(), "admission decided");
        Ok(result)
    }

    /// Delete the entry for `url`. Removing an absent key is `NotFound`, not an error.
    pub async fn remove(&self, url: &str) -> Result<RemovalResult, GateError> {
        let key = registry_key(url)?;
        let rows = self
            .registry
            .delete(key)
            .await
            .map_err(|e| GateError::storage("delete", key, e))?;
        let result = if rows > 0 {
            RemovalResult::Removed
        } else {
            RemovalResult::NotFound
        };
        tracing::info!(url = key, result = %result.code(), "removal decided");
        Ok(result)
    }

    pub async fn lookup(&self, url: &str) -> Result<Option<Entry>, GateError> {
        let key = registry_key(url)?;
        self.registry
            .get(key)
            .await
            .map_err(|e| GateError::storage("get", key, e))
    }

    pub async fn list_all(&self) -> Result<Vec<Entry>, GateError> {
        self.registry
            .list_all()
            .await
            .map_err(|e| GateError::storage("list", "*", e))
    }

    /// Screen the page, then admit it with the verdict. The fetch completes
    /// before the registry is touched.
    pub async fn check(&self, req: &SearchRequest) -> Result<CheckOutcome, GateError> {
        let verdict = self.screener.screen_request(req).await?;
        let result = self.admit(&req.url, verdict.matched).await?;
        Ok(CheckOutcome {
            url: req.url.trim().to_string(),
            verdict,
            result,
        })
    }
}
