//! Product entity - A single catalog entry.
//!
//! Field names on the wire follow the remote catalog API (`discountPercentage`).
//! Fields the catalog does not use (tags, reviews, dimensions...) are ignored on decode.

use serde::{Deserialize, Serialize};

/// A catalog product
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier within the product list
    pub id: u64,
    /// Display title, never empty
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Unit price in dollars
    pub price: f64,
    /// Discount offered, in percent
    #[serde(default)]
    pub discount_percentage: f64,
    /// Average customer rating
    #[serde(default)]
    pub rating: f64,
    /// Units in stock
    pub stock: u32,
    /// Brand name; some remote products have none
    #[serde(default)]
    pub brand: String,
    /// Category slug
    pub category: String,
    /// Thumbnail image URL
    #[serde(default)]
    pub thumbnail: String,
    /// Image URLs, in display order
    #[serde(default)]
    pub images: Vec<String>,
}

/// Body of `GET /products`.
#[derive(Clone, Debug, Deserialize)]
pub struct ProductsPage {
    /// The products on this page
    pub products: Vec<Product>,
    /// Total products known to the remote service
    #[serde(default)]
    pub total: u64,
    /// Products skipped before this page
    #[serde(default)]
    pub skip: u64,
    /// Page size the remote service applied
    #[serde(default)]
    pub limit: u64,
}

impl Product {
    /// Returns whether the title contains `needle_lower` ignoring case.
    /// The needle must already be lowercase.
    #[must_use]
    pub fn title_matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
    }
}
