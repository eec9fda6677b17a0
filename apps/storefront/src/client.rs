//! # Catalog Source
//!
//! Where products come from. The commands only see the [`CatalogSource`]
//! trait, so the HTTP client can be swapped for an in-memory catalog.
//!
//! ## Endpoints (Fake Store API)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_all_products()            GET {base}/products                   │
//! │  fetch_product(id)               GET {base}/products/{id}              │
//! │  fetch_categories()              GET {base}/products/categories        │
//! │  fetch_products_by_category(c)   GET {base}/products/category/{c}      │
//! │                                                                         │
//! │  404, or 200 with an empty/null body ──► ClientError::NotFound         │
//! │  other non-2xx ────────────────────────► ClientError::Status           │
//! │  timeout / connect failure ────────────► ClientError::Http             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use storefront_core::catalog::categories;
use storefront_core::{Product, ProductId};

/// Errors from a catalog source.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or timeout.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot be used.
    #[error("invalid catalog url: {0}")]
    InvalidUrl(String),

    /// The source is deliberately disconnected.
    #[error("catalog source is offline")]
    Offline,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Read-only access to the product catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every product in the catalog.
    async fn fetch_all_products(&self) -> ClientResult<Vec<Product>>;

    /// One product by id.
    async fn fetch_product(&self, id: ProductId) -> ClientResult<Product>;

    /// Distinct category names.
    async fn fetch_categories(&self) -> ClientResult<Vec<String>>;

    /// Products in one category.
    async fn fetch_products_by_category(&self, category: &str) -> ClientResult<Vec<Product>>;
}

// =============================================================================
// HTTP Client
// =============================================================================

/// HTTP client for the Fake Store REST API.
#[derive(Debug, Clone)]
pub struct FakeStoreClient {
    base_url: Url,
    http: Client,
}

impl FakeStoreClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, http })
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> ClientResult<T> {
        debug!(%url, "Fetching from catalog API");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("{what} not found")));
        }
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        // Unknown product ids come back as 200 with an empty body
        let body = response.text().await?;
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(ClientError::NotFound(format!("{what} not found")));
        }

        Ok(serde_json::from_str(trimmed)?)
    }
}

#[async_trait]
impl CatalogSource for FakeStoreClient {
    async fn fetch_all_products(&self) -> ClientResult<Vec<Product>> {
        let url = self.endpoint(&["products"])?;
        self.get_json(url, "Products").await
    }

    async fn fetch_product(&self, id: ProductId) -> ClientResult<Product> {
        let url = self.endpoint(&["products", &id.to_string()])?;
        self.get_json(url, &format!("Product {id}")).await
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<String>> {
        let url = self.endpoint(&["products", "categories"])?;
        self.get_json(url, "Categories").await
    }

    async fn fetch_products_by_category(&self, category: &str) -> ClientResult<Vec<Product>> {
        let url = self.endpoint(&["products", "category", category])?;
        self.get_json(url, &format!("Category '{category}'")).await
    }
}

// =============================================================================
// In-Memory Sources
// =============================================================================

/// A fixed product list served from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_all_products(&self) -> ClientResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn fetch_product(&self, id: ProductId) -> ClientResult<Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("Product {id} not found")))
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<String>> {
        Ok(categories(&self.products))
    }

    async fn fetch_products_by_category(&self, category: &str) -> ClientResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }
}

/// A source that always fails; the app runs from its cache alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCatalog;

#[async_trait]
impl CatalogSource for OfflineCatalog {
    async fn fetch_all_products(&self) -> ClientResult<Vec<Product>> {
        Err(ClientError::Offline)
    }

    async fn fetch_product(&self, _id: ProductId) -> ClientResult<Product> {
        Err(ClientError::Offline)
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<String>> {
        Err(ClientError::Offline)
    }

    async fn fetch_products_by_category(&self, _category: &str) -> ClientResult<Vec<Product>> {
        Err(ClientError::Offline)
    }
}
