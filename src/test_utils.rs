//! Shared test utilities for the catalog.
//!
//! Sample data, a notifier that records what it is sent, and a scriptable
//! [`CatalogSource`] for driving the store without a network.

#![allow(clippy::unwrap_used)]

use crate::{
    config::ProductDefaults,
    core::{
        client::CatalogSource,
        notify::{Notification, Notifier},
        store::CatalogStore,
        validation::ProductDraft,
    },
    entities::{Category, Product, ProductsPage},
    errors::{Error, Result},
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Builds a product with sensible defaults.
pub fn product(id: u64, title: &str, category: &str, price: f64, stock: u32) -> Product {
    Product {
        id,
        title: title.to_string(),
        description: format!("{title} description"),
        price,
        discount_percentage: 0.0,
        rating: 4.0,
        stock,
        brand: "Acme".to_string(),
        category: category.to_string(),
        thumbnail: format!("https://cdn.example.com/{id}/thumbnail.png"),
        images: vec![format!("https://cdn.example.com/{id}/1.png")],
    }
}

/// A product that differs from its siblings only by id and price.
pub fn priced(id: u64, price: f64) -> Product {
    product(id, &format!("Item {id}"), "misc", price, 1)
}

/// Five products across four categories, in remote order.
pub fn sample_products() -> Vec<Product> {
    vec![
        product(1, "Essence Mascara", "beauty", 9.99, 5),
        product(2, "Smartphone X", "smartphones", 499.0, 12),
        product(3, "Eyeshadow Palette", "beauty", 19.99, 44),
        product(4, "Headphones", "electronics", 89.5, 0),
        product(5, "Desk Lamp", "home-decoration", 24.0, 7),
    ]
}

pub fn sample_categories() -> Vec<Category> {
    ["beauty", "smartphones", "electronics", "home-decoration"]
        .into_iter()
        .map(Category::from_slug)
        .collect()
}

pub fn draft(title: &str, price: &str, category: &str, stock: &str, thumbnail: &str) -> ProductDraft {
    ProductDraft {
        title: title.to_string(),
        price: price.to_string(),
        category: category.to_string(),
        stock: stock.to_string(),
        thumbnail: thumbnail.to_string(),
    }
}

/// Loads `products` and the sample categories into a fresh store.
/// The load notification is consumed, so `notifier` starts out empty.
pub fn store_with(notifier: &Arc<RecordingNotifier>, products: Vec<Product>) -> CatalogStore {
    let mut store = CatalogStore::new(
        Arc::clone(notifier) as Arc<dyn Notifier>,
        ProductDefaults::default(),
    );
    let source = StubSource::with(products, sample_categories());
    block_on(store.initialize(&source));
    notifier.take();
    store
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

/// Records notifications for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Returns and clears everything recorded so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// A [`CatalogSource`] serving fixed data, or a one-shot error per operation.
pub struct StubSource {
    products: Vec<Product>,
    categories: Vec<Category>,
    products_error: Mutex<Option<Error>>,
    categories_error: Mutex<Option<Error>>,
}

impl StubSource {
    pub fn with(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
            products_error: Mutex::new(None),
            categories_error: Mutex::new(None),
        }
    }

    /// Serves the sample products and categories.
    pub fn ok() -> Self {
        Self::with(sample_products(), sample_categories())
    }

    pub fn failing_products(error: Error) -> Self {
        let source = Self::ok();
        *source.products_error.lock().unwrap() = Some(error);
        source
    }

    pub fn failing_categories(error: Error) -> Self {
        let source = Self::ok();
        *source.categories_error.lock().unwrap() = Some(error);
        source
    }
}

#[async_trait]
impl CatalogSource for StubSource {
    async fn fetch_products(&self) -> Result<ProductsPage> {
        if let Some(e) = self.products_error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(ProductsPage {
            total: self.products.len() as u64,
            products: self.products.clone(),
            skip: 0,
            limit: 0,
        })
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        if let Some(e) = self.categories_error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(self.categories.clone())
    }
}
