//! Product catalog loading.
//!
//! The catalog is a static JSON document (`api.json`) holding an array of
//! `{id, nombre, precio}` objects. It can be served over HTTP or read from
//! disk. A failed load never leaves the storefront without products: the
//! loader degrades to a fixed list of four products instead.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use puntaditas_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Default catalog location, relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "api.json";

/// Errors that can occur while fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload is not a valid product array.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The same product id appears more than once.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),
}

/// A purchasable product as published in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Externally assigned, unique product id.
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Unit price.
    #[serde(rename = "precio")]
    pub price: Price,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Products served when the catalog source is unavailable.
#[must_use]
pub fn fallback_products() -> Vec<Product> {
    vec![
        Product::new(ProductId::new(1), "Capibara", Price::from(10_000)),
        Product::new(ProductId::new(2), "Pollitos", Price::from(10_000)),
        Product::new(ProductId::new(3), "Ovejas", Price::from(15_000)),
        Product::new(ProductId::new(4), "Ranas", Price::from(12_000)),
    ]
}

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched with a GET request.
    Http(Url),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl CatalogSource {
    /// Interpret a configured location.
    ///
    /// Values starting with `http://` or `https://` are URLs; anything else
    /// is treated as a file path.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the value looks like a URL but is not one.
    pub fn parse(value: &str) -> Result<Self, url::ParseError> {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(Self::Http(Url::parse(value)?))
        } else {
            Ok(Self::File(PathBuf::from(value)))
        }
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_CATALOG_PATH))
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads the product catalog once per session.
///
/// No caching, no retries and no timeout: the first attempt either
/// succeeds or the fallback list is used.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    client: reqwest::Client,
    source: CatalogSource,
}

impl CatalogLoader {
    /// Create a loader for the given source.
    #[must_use]
    pub fn new(source: CatalogSource) -> Self {
        Self {
            client: reqwest::Client::new(),
            source,
        }
    }

    /// Load the catalog, degrading to [`fallback_products`] on any failure.
    #[instrument(skip(self), fields(source = %self.source))]
    pub async fn load_products(&self) -> Vec<Product> {
        match self.fetch().await {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                products
            }
            Err(e) => {
                warn!(error = %e, "Catalog unavailable, using fallback products");
                fallback_products()
            }
        }
    }

    /// Fetch and validate the catalog without falling back.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the source cannot be read, the payload is
    /// not a product array, or a product id is repeated.
    pub async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let body = match &self.source {
            CatalogSource::Http(url) => {
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await?
                    .error_for_status()?;
                response.text().await?
            }
            CatalogSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
        };

        debug!(bytes = body.len(), "Catalog payload received");
        parse_catalog(&body)
    }
}

/// Parse a catalog document, rejecting repeated product ids.
///
/// # Errors
///
/// Returns `CatalogError::Parse` for malformed JSON and
/// `CatalogError::DuplicateProduct` when an id appears twice.
pub fn parse_catalog(body: &str) -> Result<Vec<Product>, CatalogError> {
    let products: Vec<Product> = serde_json::from_str(body)?;

    let mut seen = HashSet::with_capacity(products.len());
    for product in &products {
        if !seen.insert(product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }
    }

    Ok(products)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_products() {
        let products = fallback_products();
        let ids: Vec<i32> = products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(products[0].name, "Capibara");
        assert_eq!(products[2].price, Price::from(15_000));
    }

    #[test]
    fn test_parse_catalog_uses_wire_names() {
        let products =
            parse_catalog(r#"[{"id": 7, "nombre": "Pulpo", "precio": 8000}]"#).unwrap();
        assert_eq!(
            products,
            vec![Product::new(ProductId::new(7), "Pulpo", Price::from(8_000))]
        );
    }

    #[test]
    fn test_parse_catalog_rejects_duplicates() {
        let body = r#"[
            {"id": 1, "nombre": "Capibara", "precio": 10000},
            {"id": 1, "nombre": "Capibara", "precio": 9000}
        ]"#;
        assert!(matches!(
            parse_catalog(body),
            Err(CatalogError::DuplicateProduct(id)) if id == ProductId::new(1)
        ));
    }

    #[test]
    fn test_parse_catalog_rejects_negative_price() {
        let body = r#"[{"id": 1, "nombre": "Capibara", "precio": -10}]"#;
        assert!(matches!(parse_catalog(body), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_parse_catalog_accepts_empty_array() {
        assert!(parse_catalog("[]").unwrap().is_empty());
    }

    #[test]
    fn test_catalog_source_parse() {
        assert!(matches!(
            CatalogSource::parse("https://shop.example.com/api.json").unwrap(),
            CatalogSource::Http(_)
        ));
        assert_eq!(
            CatalogSource::parse("data/api.json").unwrap(),
            CatalogSource::File(PathBuf::from("data/api.json"))
        );
        assert!(CatalogSource::parse("http://").is_err());
    }

    #[tokio::test]
    async fn test_load_products_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.json");
        std::fs::write(&path, r#"[{"id": 9, "nombre": "Gatito", "precio": 11000}]"#).unwrap();

        let loader = CatalogLoader::new(CatalogSource::File(path));
        let products = loader.load_products().await;

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Gatito");
    }

    #[tokio::test]
    async fn test_load_products_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let loader = CatalogLoader::new(CatalogSource::File(dir.path().join("missing.json")));

        assert!(matches!(loader.fetch().await, Err(CatalogError::Io { .. })));
        assert_eq!(loader.load_products().await, fallback_products());
    }

    #[tokio::test]
    async fn test_load_products_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.json");
        std::fs::write(&path, "{ not json").unwrap();

        let loader = CatalogLoader::new(CatalogSource::File(path));
        assert_eq!(loader.load_products().await, fallback_products());
    }
}
