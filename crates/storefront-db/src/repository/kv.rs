//! # Key-Value Repository
//!
//! The storage primitive every other repository builds on.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kv_store                                                               │
//! │  ┌──────────────────────┬──────────────────────────┬────────────────┐  │
//! │  │ key                  │ value (JSON text)        │ updated_at     │  │
//! │  ├──────────────────────┼──────────────────────────┼────────────────┤  │
//! │  │ cart                 │ {"items":[...],...}      │ 2026-...Z      │  │
//! │  │ wishlist             │ [{"id":1,...}]           │ 2026-...Z      │  │
//! │  │ catalog:products     │ [{"id":1,...},...]       │ 2026-...Z      │  │
//! │  │ catalog:categories   │ ["electronics",...]      │ 2026-...Z      │  │
//! │  └──────────────────────┴──────────────────────────┴────────────────┘  │
//! │                                                                         │
//! │  save() is an upsert: one row per key, last write wins.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for raw key-value documents.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Loads the value stored under `key`.
    pub async fn load(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Loads the value under `key` together with when it was written.
    pub async fn load_with_timestamp(
        &self,
        key: &str,
    ) -> DbResult<Option<(String, DateTime<Utc>)>> {
        let row = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            "SELECT value, updated_at FROM kv_store WHERE key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn save(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Saving document");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes `key`. Returns `true` if a row was deleted.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes every key starting with `prefix`. Returns the number removed.
    pub async fn remove_prefix(&self, prefix: &str) -> DbResult<u64> {
        let pattern = format!("{}%", prefix.replace('%', "\\%").replace('_', "\\_"));
        let result = sqlx::query("DELETE FROM kv_store WHERE key LIKE ?1 ESCAPE '\\'")
            .bind(pattern)
            .execute(&self.pool)
            .await?;

        debug!(prefix = %prefix, removed = result.rows_affected(), "Removed documents");
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_key() {
        let db = db().await;

        assert_eq!(db.kv().load("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let db = db().await;
        let kv = db.kv();

        kv.save("k", "one").await.unwrap();
        kv.save("k", "two").await.unwrap();

        assert_eq!(kv.load("k").await.unwrap().as_deref(), Some("two"));
        assert!(kv.load_with_timestamp("k").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_remove() {
        let db = db().await;
        let kv = db.kv();
        kv.save("k", "v").await.unwrap();

        assert!(kv.remove("k").await.unwrap());
        assert!(!kv.remove("k").await.unwrap());
        assert_eq!(kv.load("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_prefix_is_literal() {
        let db = db().await;
        let kv = db.kv();
        kv.save("catalog:products", "[]").await.unwrap();
        kv.save("catalog:categories", "[]").await.unwrap();
        kv.save("catalogXproducts", "[]").await.unwrap();
        kv.save("cart", "{}").await.unwrap();

        assert_eq!(kv.remove_prefix("catalog:").await.unwrap(), 2);
        assert!(kv.load("cart").await.unwrap().is_some());
        assert!(kv.load("catalogXproducts").await.unwrap().is_some());
    }
}
