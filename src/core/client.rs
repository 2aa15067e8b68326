//! Remote catalog client - Reads products and categories from the catalog API.
//!
//! [`CatalogSource`] is the seam the store loads through. [`HttpCatalogClient`]
//! implements it over HTTP; tests substitute their own source.

use crate::{
    config::api::ApiConfig,
    entities::{Category, ProductsPage, category::dedup_by_slug},
    errors::{Error, Result},
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Where the store gets its catalog from.
///
/// Both operations are side-effect-free reads.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every product, with the remote's paging counters.
    async fn fetch_products(&self) -> Result<ProductsPage>;

    /// Fetches every category, normalized to records.
    async fn fetch_categories(&self) -> Result<Vec<Category>>;
}

/// [`CatalogSource`] backed by the remote HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Builds a client for the API described by `config`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("product-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are made against, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!("Fetching {} from {}", what, url);

        let body = async {
            let response = self.client.get(&url).send().await?.error_for_status()?;
            Ok::<_, reqwest::Error>(response.text().await?)
        }
        .await
        .map_err(|e| Error::Network {
            message: format!("Failed to fetch {what}: {e}"),
        })
        .inspect_err(|e| error!("Error fetching {}: {}", what, e))?;

        decode(&body, what).inspect_err(|e| error!("Error fetching {}: {}", what, e))
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch_products(&self) -> Result<ProductsPage> {
        let page: ProductsPage = self.get_json("/products", "products").await?;
        debug!(
            "Fetched {} products (total {})",
            page.products.len(),
            page.total
        );
        Ok(page)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let categories: Vec<Category> =
            self.get_json("/products/categories", "categories").await?;
        debug!("Fetched {} categories", categories.len());
        Ok(dedup_by_slug(categories))
    }
}

fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::Decode {
        message: format!("Malformed {what} response: {e}"),
    })
}
