//! Application configuration.
//!
//! Settings come from an optional `catalog.toml`, with environment variables
//! (and `.env`) taking precedence for the API location.

/// Remote catalog API location and HTTP settings
pub mod api;

/// `catalog.toml` loading and the placeholder values for new products
pub mod catalog;

pub use api::ApiConfig;
pub use catalog::{AppConfig, ProductDefaults, load_app_configuration};
