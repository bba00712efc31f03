//! Row-level registry operations.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::SqliteRegistry;
use super::{Entry, Registry, RegistryError};

fn entry_from_row(row: &SqliteRow) -> Entry {
    Entry {
        url: row.get("url"),
        authorized: row.get("authorized"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl Registry for SqliteRegistry {
    async fn ensure_schema(&self) -> Result<(), RegistryError> {
        self.create_table().await
    }

    async fn exists(&self, url: &str) -> Result<bool, RegistryError> {
        let row = sqlx::query(
            r#"
            SELECT 1 FROM authorized_entries
            WHERE url = ?1
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    async fn get(&self, url: &str) -> Result<Option<Entry>, RegistryError> {
        let row = sqlx::query(
            r#"
            SELECT url, authorized, created_at
            FROM authorized_entries
            WHERE url = ?1
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(entry_from_row))
    }

    async fn insert(&self, entry: &Entry) -> Result<(), RegistryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO authorized_entries (url, authorized, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&entry.url)
        .bind(entry.authorized)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(RegistryError::DuplicateKey(entry.url.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, url: &str) -> Result<u64, RegistryError> {
        let r = sqlx::query(
            r#"
            DELETE FROM authorized_entries
            WHERE url = ?1
            "#,
        )
        .bind(url)
        .execute(&self.pool)
        .await?;
        Ok(r.rows_affected())
    }

    async fn list_all(&self) -> Result<Vec<Entry>, RegistryError> {
        let rows = sqlx::query(
            r#"
            SELECT url, authorized, created_at
            FROM authorized_entries
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(entry_from_row).collect())
    }
}
