//! # Catalog Query Engine
//!
//! Filters, sorts and paginates an in-memory product list.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    query(products, q)                                   │
//! │                                                                         │
//! │  products                                                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  1. category  ──── exact match, skipped when absent/empty              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  2. price     ──── min_price <= price <= max_price (each optional)     │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  3. search    ──── case-insensitive substring of title OR description  │
//! │     │                                                                   │
//! │     ├──────────────► total_matched = len                               │
//! │     ▼                                                                   │
//! │  4. sort      ──── stable; direction flips the comparator              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  5. paginate  ──── [(page-1)·size, page·size) clamped to bounds        │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  CatalogPage { items, total_matched, page, page_size }                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Input Policy
//! - `page == 0` is treated as page 1
//! - `page_size == 0` is rejected
//! - A page past the end yields an empty `items`, never an error
//! - The search term is used as given (lowercased, not trimmed), so `" "`
//!   matches only text containing a space. Any length is accepted.
//!
//! ## Name Ordering
//! Titles compare by their Unicode-lowercased code points, not by a locale
//! collation. Accented letters therefore sort after `z`: `"Éclair"` comes
//! after `"Zebra"`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_page_size;
use crate::DEFAULT_PAGE_SIZE;

// =============================================================================
// Sort Options
// =============================================================================

/// Field the result list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortKey {
    /// Keep the filtered (catalog) order.
    #[default]
    None,
    /// Unit price, numerically.
    Price,
    /// Title, case-insensitively.
    Name,
    /// Average rating.
    Rating,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::None => "none",
            SortKey::Price => "price",
            SortKey::Name => "name",
            SortKey::Rating => "rating",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(SortKey::None),
            "price" => Ok(SortKey::Price),
            "name" | "title" => Ok(SortKey::Name),
            "rating" => Ok(SortKey::Rating),
            other => Err(ValidationError::InvalidFormat {
                field: "sort key".to_string(),
                reason: format!("unknown sort key '{}'", other),
            }),
        }
    }
}

/// Ascending or descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(ValidationError::InvalidFormat {
                field: "sort direction".to_string(),
                reason: format!("expected 'asc' or 'desc', got '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Query
// =============================================================================

/// What to select from the catalog and how to present it.
///
/// ## Example
/// ```rust
/// use storefront_core::{CatalogQuery, SortDirection, SortKey};
///
/// let q = CatalogQuery::new()
///     .category("electronics")
///     .sort(SortKey::Price, SortDirection::Asc)
///     .page(1)
///     .page_size(2);
///
/// assert_eq!(q.page, 1);
/// assert_eq!(q.category.as_deref(), Some("electronics"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CatalogQuery {
    /// Free text matched against title and description. Empty matches all.
    pub search: String,
    /// Exact category. `None` or empty matches all.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Money>,
    /// Inclusive upper price bound.
    pub max_price: Option<Money>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        CatalogQuery {
            search: String::new(),
            category: None,
            min_price: None,
            max_price: None,
            sort_key: SortKey::None,
            sort_direction: SortDirection::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogQuery {
    /// Matches everything, first page, default page size.
    pub fn new() -> Self {
        CatalogQuery::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.sort_direction = direction;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    fn accepts(&self, product: &Product, needle: &str) -> bool {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if product.category != category {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        needle.is_empty() || product.matches_search(needle)
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.sort_key {
            SortKey::None => Ordering::Equal,
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::Name => compare_titles(&a.title, &b.title),
            SortKey::Rating => a.rating.rate.total_cmp(&b.rating.rate),
        };

        match self.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// =============================================================================
// Result Page
// =============================================================================

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogPage {
    pub items: Vec<Product>,
    /// Matches before pagination.
    pub total_matched: usize,
    /// Effective page (after clamping 0 to 1).
    pub page: u32,
    pub page_size: u32,
}

impl CatalogPage {
    /// Number of pages needed to show every match. Zero when nothing matched.
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total_matched.div_ceil(self.page_size as usize)
    }

    /// Checks if there is a page after this one.
    pub fn has_next(&self) -> bool {
        (self.page as usize) < self.total_pages()
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Runs `q` over `products`.
///
/// ## Errors
/// - `page_size == 0` → [`ValidationError::MustBePositive`]
///
/// ## Example
/// ```rust
/// use storefront_core::catalog::query;
/// use storefront_core::CatalogQuery;
///
/// let page = query(&[], &CatalogQuery::new()).unwrap();
/// assert!(page.items.is_empty());
/// assert_eq!(page.total_matched, 0);
/// ```
pub fn query(products: &[Product], q: &CatalogQuery) -> CoreResult<CatalogPage> {
    validate_page_size(q.page_size)?;
    let needle = q.search.to_lowercase();
    let page = q.page.max(1);

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|product| q.accepts(product, &needle))
        .collect();
    let total_matched = matched.len();

    if q.sort_key != SortKey::None {
        // sort_by is stable: equal keys keep catalog order in both directions
        matched.sort_by(|a, b| q.compare(a, b));
    }

    let page_size = q.page_size as usize;
    let start = (page as usize - 1).saturating_mul(page_size);
    let items = matched
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Ok(CatalogPage {
        items,
        total_matched,
        page,
        page_size: q.page_size,
    })
}

/// Distinct categories in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.iter().any(|c| *c == product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

// =============================================================================
// Unit Tests
// =============================================================================
