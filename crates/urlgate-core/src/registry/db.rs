//! SQLite-backed registry: connection, schema, and timestamp helpers.
//! Row-level operations live in `entries`.

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::{Registry, RegistryError};
use crate::config::GateConfig;

const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the SQLite registry. Cheap to clone; clones share the pool.
///
/// The database file defaults to `~/.local/state/urlgate/registry.db`.
#[derive(Clone)]
pub struct SqliteRegistry {
    pub(crate) pool: Pool<Sqlite>,
}

impl SqliteRegistry {
    /// Open the registry named by the config (or the XDG default) and ensure the schema.
    pub async fn open(cfg: &GateConfig) -> Result<Self> {
        let path = cfg.resolved_database_path()?;
        Self::open_with_connections(&path, cfg.max_db_connections).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_connections(path.as_ref(), DEFAULT_MAX_CONNECTIONS).await
    }

    async fn open_with_connections(path: &Path, max_connections: u32) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(&uri)
            .await
            .with_context(|| format!("open registry {}", path.display()))?;

        let registry = SqliteRegistry { pool };
        registry.ensure_schema().await?;
        tracing::debug!("registry opened at {}", path.display());
        Ok(registry)
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub(crate) async fn create_table(&self) -> Result<(), RegistryError> {
        // `url` is UNIQUE: concurrent inserts of one URL cannot both succeed.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS authorized_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT NOT NULL UNIQUE,
                authorized INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Current time as Unix seconds (for entry timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory registry for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<SqliteRegistry> {
    // Single connection: each in-memory connection would otherwise be its own empty DB.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let registry = SqliteRegistry { pool };
    registry.ensure_schema().await?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_uri_escapes_special_chars() {
        let uri = path_to_sqlite_uri(Path::new("/tmp/my dir/a#b?.db"));
        assert_eq!(uri, "sqlite:///tmp/my%20dir/a%23b%3F.db");
    }
}
