//! # Store Configuration
//!
//! Where the two stores keep their data, loaded from TOML:
//!
//! ```toml
//! channel_capacity = 32
//!
//! [products]
//! path = "data/products.json"
//!
//! [carts]
//! backend = "mongodb"          # or "memory"
//! uri = "mongodb://localhost:27017"
//! database = "ecommerce"
//! collection = "carts"
//! ```
//!
//! Every key is optional. Environment variables override the file:
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `CATALOG_PRODUCTS_PATH` | `products.path` |
//! | `MONGODB_URI` | `carts.uri` |
//! | `MONGODB_DATABASE` | `carts.database` |

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const PRODUCTS_PATH_VAR: &str = "CATALOG_PRODUCTS_PATH";
pub const MONGODB_URI_VAR: &str = "MONGODB_URI";
pub const MONGODB_DATABASE_VAR: &str = "MONGODB_DATABASE";

/// Errors loading or validating a [`StoreConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Request buffer of each actor.
    pub channel_capacity: usize,
    pub products: ProductStoreConfig,
    pub carts: CartStoreConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductStoreConfig {
    /// The JSON file holding the product array.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartBackend {
    Mongodb,
    /// Carts live only as long as the process. For demos and tests.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartStoreConfig {
    pub backend: CartBackend,
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            products: ProductStoreConfig::default(),
            carts: CartStoreConfig::default(),
        }
    }
}

impl Default for ProductStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/products.json"),
        }
    }
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self {
            backend: CartBackend::Mongodb,
            uri: "mongodb://localhost:27017".to_string(),
            database: "ecommerce".to_string(),
            collection: "carts".to_string(),
        }
    }
}

impl StoreConfig {
    /// Read `path`, apply environment overrides and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content)?
            .with_overrides(|name| std::env::var(name).ok())
            .validated()?;

        info!(
            path = %path.display(),
            products = %config.products.path.display(),
            carts = ?config.carts.backend,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Defaults plus environment overrides, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default()
            .with_overrides(|name| std::env::var(name).ok())
            .validated()
    }

    /// Parse TOML without overrides or validation.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply the overrides `lookup` returns a value for.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(PRODUCTS_PATH_VAR) {
            self.products.path = PathBuf::from(path);
        }
        if let Some(uri) = lookup(MONGODB_URI_VAR) {
            self.carts.uri = uri;
        }
        if let Some(database) = lookup(MONGODB_DATABASE_VAR) {
            self.carts.database = database;
        }
        self
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "channel_capacity must be positive".into(),
            ));
        }
        if self.products.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("products.path must not be empty".into()));
        }
        if self.carts.backend == CartBackend::Mongodb {
            for (key, value) in [
                ("carts.uri", &self.carts.uri),
                ("carts.database", &self.carts.database),
                ("carts.collection", &self.carts.collection),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!("{key} must not be empty")));
                }
            }
        }
        Ok(())
    }
}
