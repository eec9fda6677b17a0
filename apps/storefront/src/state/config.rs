//! # Application Configuration
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults          api https://fakestoreapi.com, 10 s timeout,      │
//! │                       9 per page (max 100), 10% tax, USD ($), 1 h TTL  │
//! │  2. storefront.toml   --config <path>, else the platform config dir    │
//! │  3. Environment       STOREFRONT_API_URL, STOREFRONT_API_TIMEOUT_SECS, │
//! │                       STOREFRONT_TAX_RATE, STOREFRONT_PAGE_SIZE,       │
//! │                       STOREFRONT_DB_PATH                               │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example `storefront.toml`
//! ```toml
//! api_base_url = "https://fakestoreapi.com"
//! tax_rate_bps = 825
//! currency_symbol = "$"
//! default_page_size = 12
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use storefront_core::{Money, TaxRate, DEFAULT_PAGE_SIZE, DEFAULT_TAX_RATE_BPS, MAX_PAGE_SIZE};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Catalog API base URL.
    pub api_base_url: String,

    /// Per-request timeout for the catalog API.
    pub api_timeout_secs: u64,

    /// Products per page when the caller doesn't say.
    pub default_page_size: u32,

    /// Largest page size accepted; larger requests are clamped.
    pub max_page_size: u32,

    /// Sales tax in basis points (1000 = 10%).
    pub tax_rate_bps: u32,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// How long cached catalog responses count as fresh.
    pub catalog_cache_ttl_secs: u64,

    /// Database file. `None` means the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            api_base_url: "https://fakestoreapi.com".to_string(),
            api_timeout_secs: 10,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            catalog_cache_ttl_secs: 3600,
            database_path: None,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file. Keys that are absent keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Checks values that would break the app at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "api_base_url must start with http:// or https://, got: {}",
                self.api_base_url
            )));
        }

        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "default_page_size must be greater than 0".into(),
            ));
        }

        if self.max_page_size < self.default_page_size {
            return Err(ConfigError::Invalid(format!(
                "max_page_size ({}) must be at least default_page_size ({})",
                self.max_page_size, self.default_page_size
            )));
        }

        if self.tax_rate_bps > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "tax rate must be at most 100%, got {}",
                self.tax_rate()
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `STOREFRONT_*` overrides read through `var`.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("STOREFRONT_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api_base_url = url;
        }

        if let Some(secs) = var("STOREFRONT_API_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => self.api_timeout_secs = secs,
                Err(_) => warn!(value = %secs, "Ignoring invalid STOREFRONT_API_TIMEOUT_SECS"),
            }
        }

        if let Some(rate) = var("STOREFRONT_TAX_RATE") {
            match TaxRate::from_percentage(&rate) {
                Some(rate) => {
                    debug!(%rate, "Overriding tax rate from environment");
                    self.tax_rate_bps = rate.bps();
                }
                None => warn!(value = %rate, "Ignoring invalid STOREFRONT_TAX_RATE"),
            }
        }

        if let Some(size) = var("STOREFRONT_PAGE_SIZE") {
            match size.parse::<u32>() {
                Ok(size) => self.default_page_size = size,
                Err(_) => warn!(value = %size, "Ignoring invalid STOREFRONT_PAGE_SIZE"),
            }
        }

        if let Some(path) = var("STOREFRONT_DB_PATH") {
            self.database_path = Some(PathBuf::from(path));
        }
    }

    /// `<platform config dir>/storefront.toml`
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The single tax rate used by the cart ledger.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn catalog_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog_cache_ttl_secs)
    }

    /// Resolves a requested page size: default when absent, clamped to the
    /// maximum. Zero passes through so the query engine can reject it.
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }

    /// Formats an amount with the configured symbol, rounded to cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_app::state::ConfigState;
    /// use storefront_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ConfigState::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.tax_rate(), TaxRate::from_bps(1000));
        assert_eq!(config.default_page_size, 9);
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();

        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency("10.995".parse().unwrap()), "$11.00");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ConfigState = toml::from_str(
            r#"
            tax_rate_bps = 825
            currency_symbol = "€"
            "#,
        )
        .unwrap();

        assert_eq!(config.tax_rate_bps, 825);
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.api_base_url, "https://fakestoreapi.com");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ConfigState::default();

        config.apply_overrides(env(&[
            ("STOREFRONT_API_URL", "http://localhost:3000"),
            ("STOREFRONT_TAX_RATE", "8.25"),
            ("STOREFRONT_PAGE_SIZE", "12"),
            ("STOREFRONT_DB_PATH", "/tmp/shop.db"),
        ]));

        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.tax_rate_bps, 825);
        assert_eq!(config.default_page_size, 12);
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/shop.db")));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = ConfigState::default();

        config.apply_overrides(env(&[
            ("STOREFRONT_TAX_RATE", "ten"),
            ("STOREFRONT_API_TIMEOUT_SECS", "-1"),
        ]));

        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_url = ConfigState {
            api_base_url: "ftp://example.com".to_string(),
            ..ConfigState::default()
        };
        let zero_page = ConfigState {
            default_page_size: 0,
            ..ConfigState::default()
        };
        let max_below_default = ConfigState {
            max_page_size: 5,
            ..ConfigState::default()
        };
        let huge_tax = ConfigState {
            tax_rate_bps: 10_001,
            ..ConfigState::default()
        };

        for config in [bad_url, zero_page, max_below_default, huge_tax] {
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_page_size_resolution() {
        let config = ConfigState::default();

        assert_eq!(config.page_size(None), 9);
        assert_eq!(config.page_size(Some(20)), 20);
        assert_eq!(config.page_size(Some(500)), 100);
        assert_eq!(config.page_size(Some(0)), 0);
    }
}
