//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `PUNTADITAS_CATALOG` - Catalog URL or file path (default: api.json)
//! - `PUNTADITAS_DATA_DIR` - Directory for the persisted cart (default: .puntaditas)
//! - `PUNTADITAS_CHECKOUT_URL` - Page to continue to after checkout (default: checkout.html)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{CatalogSource, DEFAULT_CATALOG_PATH};

const DEFAULT_DATA_DIR: &str = ".puntaditas";
const DEFAULT_CHECKOUT_URL: &str = "checkout.html";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Where the product catalog is loaded from
    pub catalog: CatalogSource,
    /// Directory holding the persisted cart
    pub data_dir: PathBuf,
    /// Follow-up page after a completed checkout
    pub checkout_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., production)
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default = |key: &str, default: &str| {
            non_empty(lookup(key)).unwrap_or_else(|| default.to_string())
        };

        let catalog_value = get_or_default("PUNTADITAS_CATALOG", DEFAULT_CATALOG_PATH);
        let catalog = CatalogSource::parse(&catalog_value).map_err(|e| {
            ConfigError::InvalidEnvVar("PUNTADITAS_CATALOG".to_string(), e.to_string())
        })?;

        Ok(Self {
            catalog,
            data_dir: PathBuf::from(get_or_default("PUNTADITAS_DATA_DIR", DEFAULT_DATA_DIR)),
            checkout_url: get_or_default("PUNTADITAS_CHECKOUT_URL", DEFAULT_CHECKOUT_URL),
            sentry_dsn: non_empty(lookup("SENTRY_DSN")),
            sentry_environment: non_empty(lookup("SENTRY_ENVIRONMENT")),
        })
    }
}

/// Treat blank values the same as unset ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.catalog, CatalogSource::File(PathBuf::from("api.json")));
        assert_eq!(config.data_dir, PathBuf::from(".puntaditas"));
        assert_eq!(config.checkout_url, "checkout.html");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_http_catalog() {
        let config = config_from(&[("PUNTADITAS_CATALOG", "https://shop.example.com/api.json")])
            .unwrap();
        assert!(matches!(config.catalog, CatalogSource::Http(url) if url.path() == "/api.json"));
    }

    #[test]
    fn test_invalid_catalog_url() {
        let result = config_from(&[("PUNTADITAS_CATALOG", "https://")]);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "PUNTADITAS_CATALOG"));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("PUNTADITAS_DATA_DIR", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".puntaditas"));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PUNTADITAS_DATA_DIR", "/var/lib/puntaditas"),
            ("PUNTADITAS_CHECKOUT_URL", "https://shop.example.com/gracias"),
            ("SENTRY_ENVIRONMENT", "production"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/puntaditas"));
        assert_eq!(config.checkout_url, "https://shop.example.com/gracias");
        assert_eq!(config.sentry_environment.as_deref(), Some("production"));
    }
}
