//! # Product Commands
//!
//! Catalog listing, lookup, and cache refresh.
//!
//! ## Catalog Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_catalog()                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  Cached and younger than the TTL?         │──► YES: use it          │
//! │  └───────────────────────────────────────────┘                         │
//! │       │ NO                                                              │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  CatalogSource::fetch_all_products()      │──► OK: cache + use it   │
//! │  └───────────────────────────────────────────┘                         │
//! │       │ ERR                                                             │
//! │       ▼                                                                 │
//! │  Stale cache if any, else an empty catalog. Either way the response    │
//! │  carries a warning.                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storefront_core::catalog::query()  (filter, sort, paginate)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::AppState;
use storefront_core::catalog::{self, categories};
use storefront_core::validation::validate_search_query;
use storefront_core::{
    CatalogQuery, CoreError, Money, Product, ProductId, SortDirection, SortKey,
};

/// Product listing parameters as the caller supplies them.
///
/// Absent fields take the query defaults; `page_size` falls back to the
/// configured default and is clamped to the configured maximum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductListRequest {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// One page of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub items: Vec<Product>,
    pub total_matched: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: usize,
    pub has_next: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Unpaginated products, e.g. one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub items: Vec<Product>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListResponse {
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Result of a forced cache refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub products: usize,
    pub categories: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Returns the full catalog plus any degradation warnings.
///
/// Never fails: every collaborator error degrades to a warning.
pub(crate) async fn load_catalog(state: &AppState) -> (Vec<Product>, Vec<String>) {
    let cache = state.db.inner().catalog_cache();
    let mut warnings = Vec::new();

    match cache
        .load_products_fresh(state.config.catalog_cache_ttl())
        .await
    {
        Ok(Some(products)) => {
            debug!(count = products.len(), "Catalog served from cache");
            return (products, warnings);
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Catalog cache unreadable"),
    }

    let fetch_error = match state.catalog.fetch_all_products().await {
        Ok(products) => {
            info!(count = products.len(), "Catalog fetched");
            if let Err(e) = cache.save_products(&products).await {
                warn!(error = %e, "Failed to cache catalog");
            }
            return (products, warnings);
        }
        Err(e) => e,
    };

    warn!(error = %fetch_error, "Catalog fetch failed");

    match cache.load_products_any().await {
        Ok(Some(cached)) => {
            warnings.push(format!(
                "Catalog unavailable ({}), showing products cached at {}",
                fetch_error,
                cached.fetched_at.to_rfc3339()
            ));
            (cached.value, warnings)
        }
        Ok(None) | Err(_) => {
            warnings.push(format!("Catalog unavailable: {}", fetch_error));
            (Vec::new(), warnings)
        }
    }
}

/// Lists products matching the request.
///
/// The search term is passed through untrimmed.
///
/// ## Errors
/// - `VALIDATION_ERROR` for page size 0 or a search term over 100 characters
pub async fn list_products(
    state: &AppState,
    request: ProductListRequest,
) -> Result<ProductListResponse, ApiError> {
    let start = Instant::now();
    debug!(?request, "list_products command");

    let mut query = CatalogQuery::new()
        .price_range(request.min_price, request.max_price)
        .sort(request.sort, request.direction)
        .page(request.page.unwrap_or(1))
        .page_size(state.config.page_size(request.page_size));
    if let Some(search) = request.search {
        validate_search_query(&search).map_err(CoreError::from)?;
        query = query.search(search);
    }
    if let Some(category) = request.category {
        query = query.category(category);
    }

    let (products, warnings) = load_catalog(state).await;
    let page = catalog::query(&products, &query)?;

    debug!(
        matched = page.total_matched,
        returned = page.items.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "list_products complete"
    );

    Ok(ProductListResponse {
        total_pages: page.total_pages(),
        has_next: page.has_next(),
        items: page.items,
        total_matched: page.total_matched,
        page: page.page,
        page_size: page.page_size,
        warnings,
    })
}

/// Gets one product, from the cache when possible.
///
/// ## Errors
/// - `NOT_FOUND` if neither the cache nor the source knows the id
/// - `CATALOG_UNAVAILABLE` if the source is unreachable and the cache misses
pub async fn get_product(state: &AppState, id: ProductId) -> Result<Product, ApiError> {
    debug!(id, "get_product command");

    match state.db.inner().catalog_cache().load_products_any().await {
        Ok(Some(cached)) => {
            if let Some(product) = cached.value.into_iter().find(|p| p.id == id) {
                return Ok(product);
            }
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Catalog cache unreadable"),
    }

    Ok(state.catalog.fetch_product(id).await?)
}

/// Lists categories: fresh cache, then the source, then stale cache, then
/// categories derived from whatever products are cached.
pub async fn list_categories(state: &AppState) -> Result<CategoryListResponse, ApiError> {
    debug!("list_categories command");

    let cache = state.db.inner().catalog_cache();
    let mut warnings = Vec::new();

    match cache
        .load_categories_fresh(state.config.catalog_cache_ttl())
        .await
    {
        Ok(Some(categories)) => {
            return Ok(CategoryListResponse {
                categories,
                warnings,
            })
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Category cache unreadable"),
    }

    let fetch_error = match state.catalog.fetch_categories().await {
        Ok(categories) => {
            if let Err(e) = cache.save_categories(&categories).await {
                warn!(error = %e, "Failed to cache categories");
            }
            return Ok(CategoryListResponse {
                categories,
                warnings,
            });
        }
        Err(e) => e,
    };

    warn!(error = %fetch_error, "Category fetch failed");
    warnings.push(format!("Catalog unavailable: {}", fetch_error));

    if let Ok(Some(cached)) = cache.load_categories_any().await {
        return Ok(CategoryListResponse {
            categories: cached.value,
            warnings,
        });
    }

    let categories = match cache.load_products_any().await {
        Ok(Some(cached)) => categories(&cached.value),
        Ok(None) | Err(_) => Vec::new(),
    };

    Ok(CategoryListResponse {
        categories,
        warnings,
    })
}

/// Products in one category, straight from the source.
///
/// Falls back to filtering the cached catalog when the source fails.
pub async fn products_by_category(
    state: &AppState,
    category: &str,
) -> Result<ProductsResponse, ApiError> {
    let category = category.trim();
    debug!(category, "products_by_category command");

    if category.is_empty() {
        return Err(ApiError::validation("category is required"));
    }

    match state.catalog.fetch_products_by_category(category).await {
        Ok(items) => Ok(ProductsResponse {
            items,
            warnings: Vec::new(),
        }),
        Err(e) => {
            warn!(error = %e, category, "Category fetch failed, filtering cache");
            let items = match state.db.inner().catalog_cache().load_products_any().await {
                Ok(Some(cached)) => cached
                    .value
                    .into_iter()
                    .filter(|p| p.category == category)
                    .collect(),
                Ok(None) | Err(_) => Vec::new(),
            };
            Ok(ProductsResponse {
                items,
                warnings: vec![format!("Catalog unavailable: {}", e)],
            })
        }
    }
}

/// Drops the catalog cache and refetches it.
///
/// ## Errors
/// - `CATALOG_UNAVAILABLE` if the products can't be fetched. The cache is
///   already cleared at that point.
pub async fn refresh_catalog(state: &AppState) -> Result<RefreshResponse, ApiError> {
    debug!("refresh_catalog command");

    let cache = state.db.inner().catalog_cache();
    let removed = cache.clear().await?;
    debug!(removed, "Catalog cache cleared");

    let products = state.catalog.fetch_all_products().await?;
    cache.save_products(&products).await?;

    let mut warnings = Vec::new();
    let category_list = match state.catalog.fetch_categories().await {
        Ok(list) => list,
        Err(e) => {
            warnings.push(format!("Categories derived from products: {}", e));
            categories(&products)
        }
    };
    cache.save_categories(&category_list).await?;

    info!(
        products = products.len(),
        categories = category_list.len(),
        "Catalog refreshed"
    );

    Ok(RefreshResponse {
        products: products.len(),
        categories: category_list.len(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{OfflineCatalog, StaticCatalog};
    use crate::commands::test_support::{sample_products, state_with};
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_list_products_fetches_and_caches() {
        let state = state_with(StaticCatalog::new(sample_products())).await;

        let response = list_products(&state, ProductListRequest::default())
            .await
            .unwrap();

        assert_eq!(response.total_matched, 5);
        assert_eq!(response.page_size, 9);
        assert_eq!(response.total_pages, 1);
        assert!(response.warnings.is_empty());

        let cached = state
            .db
            .inner()
            .catalog_cache()
            .load_products_any()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cached.value.len(), 5);
    }

    #[tokio::test]
    async fn test_list_products_filters_and_sorts() {
        let state = state_with(StaticCatalog::new(sample_products())).await;

        let request = ProductListRequest {
            category: Some("electronics".to_string()),
            sort: SortKey::Price,
            direction: SortDirection::Desc,
            ..ProductListRequest::default()
        };
        let response = list_products(&state, request).await.unwrap();

        let ids: Vec<_> = response.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 4]);
    }

    #[tokio::test]
    async fn test_page_size_is_clamped_and_zero_rejected() {
        let state = state_with(StaticCatalog::new(sample_products())).await;

        let big = ProductListRequest {
            page_size: Some(1000),
            ..ProductListRequest::default()
        };
        assert_eq!(list_products(&state, big).await.unwrap().page_size, 100);

        let zero = ProductListRequest {
            page_size: Some(0),
            ..ProductListRequest::default()
        };
        let err = list_products(&state, zero).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_search_length_is_capped_but_not_trimmed() {
        let state = state_with(StaticCatalog::new(sample_products())).await;

        let long = ProductListRequest {
            search: Some("a".repeat(101)),
            ..ProductListRequest::default()
        };
        let err = list_products(&state, long).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let padded = ProductListRequest {
            search: Some(format!("{}x", " ".repeat(99))),
            ..ProductListRequest::default()
        };
        let response = list_products(&state, padded).await.unwrap();
        assert_eq!(response.total_matched, 0);
    }

    #[tokio::test]
    async fn test_offline_without_cache_returns_empty_with_warning() {
        let state = state_with(OfflineCatalog).await;

        let response = list_products(&state, ProductListRequest::default())
            .await
            .unwrap();

        assert!(response.items.is_empty());
        assert_eq!(response.total_pages, 0);
        assert_eq!(response.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_offline_with_stale_cache_serves_it() {
        let state = state_with(OfflineCatalog).await;
        state
            .db
            .inner()
            .catalog_cache()
            .save_products(&sample_products())
            .await
            .unwrap();

        std::thread::sleep(std::time::Duration::from_millis(5));
        let mut config = state.config.clone();
        config.catalog_cache_ttl_secs = 0;
        let state = crate::state::AppState { config, ..state };

        let response = list_products(&state, ProductListRequest::default())
            .await
            .unwrap();

        assert_eq!(response.total_matched, 5);
        assert!(response.warnings[0].contains("cached at"));
    }

    #[tokio::test]
    async fn test_get_product_cache_then_source() {
        let state = state_with(StaticCatalog::new(sample_products())).await;

        assert_eq!(get_product(&state, 3).await.unwrap().title, "Gold Ring");

        let err = get_product(&state, 99).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_get_product_offline_uses_cache() {
        let state = state_with(OfflineCatalog).await;
        state
            .db
            .inner()
            .catalog_cache()
            .save_products(&sample_products())
            .await
            .unwrap();

        assert_eq!(get_product(&state, 2).await.unwrap().id, 2);

        let err = get_product(&state, 42).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
    }

    #[tokio::test]
    async fn test_list_categories_falls_back_to_cached_products() {
        let state = state_with(OfflineCatalog).await;
        state
            .db
            .inner()
            .catalog_cache()
            .save_products(&sample_products())
            .await
            .unwrap();

        let response = list_categories(&state).await.unwrap();

        assert_eq!(
            response.categories,
            vec!["men's clothing", "jewelery", "electronics"]
        );
        assert_eq!(response.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_products_by_category() {
        let state = state_with(StaticCatalog::new(sample_products())).await;

        let response = products_by_category(&state, "jewelery").await.unwrap();
        assert_eq!(response.items.len(), 1);

        let err = products_by_category(&state, "  ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_refresh_catalog() {
        let state = state_with(StaticCatalog::new(sample_products())).await;

        let response = refresh_catalog(&state).await.unwrap();

        assert_eq!(response.products, 5);
        assert_eq!(response.categories, 3);
    }

    #[tokio::test]
    async fn test_refresh_catalog_offline_fails() {
        let state = state_with(OfflineCatalog).await;

        let err = refresh_catalog(&state).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
    }
}
