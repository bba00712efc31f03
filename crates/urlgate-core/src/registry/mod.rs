//! Persistent registry of authorized URLs (SQLite via sqlx).
//!
//! One row per URL. Rows are write-once: the only way to change an entry is
//! to delete it and admit the URL again.

mod db;
mod entries;

pub use db::SqliteRegistry;
#[cfg(test)]
pub(crate) use db::open_memory;

use async_trait::async_trait;
use serde::Serialize;

/// A persisted `(url, authorized)` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub url: String,
    pub authorized: bool,
    /// Unix seconds at insert time.
    pub created_at: i64,
}

impl Entry {
    /// New authorized entry stamped with the current time.
    pub fn new_authorized(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            authorized: true,
            created_at: db::unix_timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// An entry with this URL already exists; nothing was written.
    #[error("entry already exists for {0}")]
    DuplicateKey(String),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Keyed store of entries. Implementations must enforce URL uniqueness in
/// `insert` so that a lost race is reported as `DuplicateKey`.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Create the backing table if missing. Idempotent.
    async fn ensure_schema(&self) -> Result<(), RegistryError>;

    async fn exists(&self, url: &str) -> Result<bool, RegistryError>;

    async fn get(&self, url: &str) -> Result<Option<Entry>, RegistryError>;

    /// Insert a new entry; `DuplicateKey` if the URL is already present.
    async fn insert(&self, entry: &Entry) -> Result<(), RegistryError>;

    /// Delete by URL, returning the number of rows removed (0 or 1).
    async fn delete(&self, url: &str) -> Result<u64, RegistryError>;

    /// All entries, newest first.
    async fn list_all(&self) -> Result<Vec<Entry>, RegistryError>;
}
