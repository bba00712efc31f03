//! Error taxonomy shared by the screener and the admission controller.
//!
//! Policy outcomes (created, rejected, conflict, not found) are not errors;
//! they are returned as values by `admission`. `GateError` covers the three
//! failure kinds a caller must distinguish: bad input, fetch failure and
//! registry failure.

use std::fmt;

use crate::fetch::FetchError;
use crate::registry::RegistryError;

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// Empty or malformed URL, empty word list, or a word failing the character rule.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Page could not be retrieved.
    #[error("fetching {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    /// Registry I/O failed; nothing was written.
    #[error("registry {op} for {url} failed: {source}")]
    Storage {
        op: &'static str,
        url: String,
        #[source]
        source: RegistryError,
    },
}

impl GateError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GateError::InvalidInput(msg.into())
    }

    pub(crate) fn storage(op: &'static str, url: &str, source: RegistryError) -> Self {
        GateError::Storage {
            op,
            url: url.to_string(),
            source,
        }
    }

    pub fn code(&self) -> ResultCode {
        match self {
            GateError::InvalidInput(_) => ResultCode::InvalidInput,
            GateError::Fetch { .. } => ResultCode::FetchError,
            GateError::Storage { .. } => ResultCode::StorageError,
        }
    }
}

/// Caller-facing result codes, consumed by a transport layer to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Created,
    Rejected,
    ConflictExists,
    ConflictRejected,
    Removed,
    NotFound,
    InvalidInput,
    FetchError,
    StorageError,
}

impl ResultCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultCode::Created => "CREATED",
            ResultCode::Rejected => "REJECTED",
            ResultCode::ConflictExists => "CONFLICT_EXISTS",
            ResultCode::ConflictRejected => "CONFLICT_REJECTED",
            ResultCode::Removed => "REMOVED",
            ResultCode::NotFound => "NOT_FOUND",
            ResultCode::InvalidInput => "INVALID_INPUT",
            ResultCode::FetchError => "FETCH_ERROR",
            ResultCode::StorageError => "STORAGE_ERROR",
        }
    }

    /// HTTP status an API layer should answer with.
    pub fn http_status(self) -> u16 {
        match self {
            ResultCode::Created => 201,
            ResultCode::Rejected => 200,
            ResultCode::ConflictExists | ResultCode::ConflictRejected => 409,
            ResultCode::Removed => 204,
            ResultCode::NotFound => 404,
            ResultCode::InvalidInput => 400,
            ResultCode::FetchError => 502,
            ResultCode::StorageError => 500,
        }
    }

    /// True for codes that represent a failed operation rather than a policy outcome.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            ResultCode::InvalidInput | ResultCode::FetchError | ResultCode::StorageError
        )
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
