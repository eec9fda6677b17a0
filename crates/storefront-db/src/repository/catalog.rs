//! # Catalog Cache Repository
//!
//! Keeps the last catalog responses so the app can skip the network while
//! they are fresh and still show something when the network is down.
//!
//! ## Cache Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_products_fresh(ttl)                                              │
//! │     ├── age <= ttl ──► Some(products)      (no fetch needed)           │
//! │     └── older/absent ► None                                            │
//! │                                                                         │
//! │  fetch from catalog source                                             │
//! │     ├── ok ──────────► save_products(..)                               │
//! │     └── failed ──────► load_products_any()  (stale, better than empty) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::kv::KvRepository;
use storefront_core::Product;

const PREFIX: &str = "catalog:";
const PRODUCTS_KEY: &str = "catalog:products";
const CATEGORIES_KEY: &str = "catalog:categories";

/// A cached document and when it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> Cached<T> {
    /// Checks if the entry is no older than `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        // A timestamp in the future (clock moved back) counts as fresh
        (Utc::now() - self.fetched_at)
            .to_std()
            .map_or(true, |age| age <= ttl)
    }
}

#[derive(Debug, Clone)]
pub struct CatalogCacheRepository {
    kv: KvRepository,
}

impl CatalogCacheRepository {
    pub fn new(kv: KvRepository) -> Self {
        CatalogCacheRepository { kv }
    }

    pub async fn save_products(&self, products: &[Product]) -> DbResult<()> {
        self.save(PRODUCTS_KEY, products).await
    }

    /// Cached products no older than `ttl`.
    pub async fn load_products_fresh(&self, ttl: Duration) -> DbResult<Option<Vec<Product>>> {
        self.load_fresh(PRODUCTS_KEY, ttl).await
    }

    /// Cached products regardless of age.
    pub async fn load_products_any(&self) -> DbResult<Option<Cached<Vec<Product>>>> {
        self.load(PRODUCTS_KEY).await
    }

    pub async fn save_categories(&self, categories: &[String]) -> DbResult<()> {
        self.save(CATEGORIES_KEY, categories).await
    }

    /// Cached categories no older than `ttl`.
    pub async fn load_categories_fresh(&self, ttl: Duration) -> DbResult<Option<Vec<String>>> {
        self.load_fresh(CATEGORIES_KEY, ttl).await
    }

    /// Cached categories regardless of age.
    pub async fn load_categories_any(&self) -> DbResult<Option<Cached<Vec<String>>>> {
        self.load(CATEGORIES_KEY).await
    }

    /// Drops every cached catalog document. Returns how many were removed.
    pub async fn clear(&self) -> DbResult<u64> {
        self.kv.remove_prefix(PREFIX).await
    }

    async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let json = serde_json::to_string(value)?;
        self.kv.save(key, &json).await
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<Cached<T>>> {
        match self.kv.load_with_timestamp(key).await? {
            Some((json, fetched_at)) => Ok(Some(Cached {
                value: serde_json::from_str(&json)?,
                fetched_at,
            })),
            None => Ok(None),
        }
    }

    async fn load_fresh<T: DeserializeOwned>(
        &self,
        key: &str,
        ttl: Duration,
    ) -> DbResult<Option<T>> {
        let cached = self.load::<T>(key).await?;
        match cached {
            Some(entry) if entry.is_fresh(ttl) => Ok(Some(entry.value)),
            Some(entry) => {
                debug!(key = %key, fetched_at = %entry.fetched_at, "Cache entry is stale");
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
