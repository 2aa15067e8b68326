//! Catalog configuration loading from catalog.toml
//!
//! The file is optional. Every section and key has a default, so a missing file
//! or a partial one both produce a usable [`AppConfig`].

use super::api::ApiConfig;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the config file to read.
pub const CONFIG_PATH_VAR: &str = "CATALOG_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "catalog.toml";

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Remote API settings
    pub api: ApiConfig,
    /// Values filled in for fields the add-product form does not collect
    pub defaults: ProductDefaults,
}

/// Placeholder values for products created in this session.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProductDefaults {
    /// Used as thumbnail and sole image when the user gives none
    pub thumbnail: String,
    /// Description given to new products
    pub description: String,
    /// Brand given to new products
    pub brand: String,
    /// Discount, in percent, given to new products
    pub discount_percentage: f64,
    /// Rating given to new products
    pub rating: f64,
}

impl Default for ProductDefaults {
    fn default() -> Self {
        Self {
            thumbnail: "https://placehold.co/100x100".to_string(),
            description: "Product description".to_string(),
            brand: "Brand".to_string(),
            discount_percentage: 0.0,
            rating: 0.0,
        }
    }
}

/// Loads catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A key has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    parse_config(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from config file {path_ref:?}: {e}"),
    })
}

fn parse_config(contents: &str) -> std::result::Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Loads the application configuration.
///
/// Reads the file named by `CATALOG_CONFIG` (default `./catalog.toml`). A missing
/// default file is not an error; a missing file that was asked for explicitly is.
/// `CATALOG_API_URL` then overrides the API base URL.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed, or if an
/// explicitly configured file does not exist.
pub fn load_app_configuration() -> Result<AppConfig> {
    let explicit = std::env::var(CONFIG_PATH_VAR).ok();
    let path = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

    let config = if explicit.is_none() && !Path::new(path).exists() {
        info!("No {} found, using default configuration.", path);
        AppConfig::default()
    } else {
        load_config(path)?
    };

    Ok(AppConfig {
        api: config.api.with_env_override(),
        ..config
    })
}
