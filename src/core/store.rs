//! Catalog store - The single owner of catalog state.
//!
//! Holds the product and category lists, the user's query, and the load
//! status. Every mutator finishes by recomputing the filtered view, so readers
//! never see a view that disagrees with the state it was derived from.

use crate::{
    config::ProductDefaults,
    core::{
        client::CatalogSource,
        notify::{Notification, Notifier},
        query::{CategoryFilter, QueryState, SortDirection, SortKey, SortSpec, derive_view},
        validation::NewProduct,
    },
    entities::{Category, Product},
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Shown to the user when the initial load fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";

/// Identifier given to the first product added to an empty catalog.
pub const FIRST_PRODUCT_ID: u64 = 1;

/// Catalog state and the view derived from it.
pub struct CatalogStore {
    products: Vec<Product>,
    categories: Vec<Category>,
    query: QueryState,
    filtered: Vec<Product>,
    loading: bool,
    initialized: bool,
    error: Option<String>,
    defaults: ProductDefaults,
    notifier: Arc<dyn Notifier>,
}

impl CatalogStore {
    /// Creates an empty store. It reports loading until [`initialize`](Self::initialize) completes.
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>, defaults: ProductDefaults) -> Self {
        Self {
            products: Vec::new(),
            categories: Vec::new(),
            query: QueryState::default(),
            filtered: Vec::new(),
            loading: true,
            initialized: false,
            error: None,
            defaults,
            notifier,
        }
    }

    /// Loads products and categories from `source`.
    ///
    /// Both fetches run concurrently. Products and categories are stored only if
    /// both succeed; otherwise the store keeps its empty lists, records an error,
    /// and notifies the user. Loading is cleared either way. Runs once: later
    /// calls are ignored.
    pub async fn initialize(&mut self, source: &dyn CatalogSource) {
        if self.initialized {
            warn!("Catalog store already initialized; ignoring repeated initialize");
            return;
        }
        self.initialized = true;
        self.loading = true;
        info!("Loading catalog...");

        let (products, categories) =
            tokio::join!(source.fetch_products(), source.fetch_categories());

        match products.and_then(|page| categories.map(|cats| (page, cats))) {
            Ok((page, categories)) => {
                info!(
                    "Catalog loaded: {} products, {} categories",
                    page.products.len(),
                    categories.len()
                );
                self.products = page.products;
                self.categories = categories;
                self.error = None;
                self.notifier.notify(Notification::normal(
                    "Catalog loaded",
                    format!("Loaded {} products.", self.products.len()),
                ));
            }
            Err(e) => {
                warn!("Catalog load failed: {}", e);
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
                self.notifier
                    .notify(Notification::error("Error", LOAD_FAILED_MESSAGE));
            }
        }

        self.loading = false;
        self.recompute();
    }

    /// Replaces the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
        debug!("Search term set to {:?}", self.query.search_term);
        self.recompute();
    }

    /// Selects a category by slug; `all-categories` (or empty) clears the filter.
    pub fn set_selected_category(&mut self, slug: &str) {
        let filter = CategoryFilter::from_selection(slug);
        if let CategoryFilter::Slug(slug) = &filter {
            if !self.categories.iter().any(|c| &c.slug == slug) {
                warn!("Selected category '{}' is not a known category", slug);
            }
        }
        debug!("Category filter set to {}", filter.as_selection());
        self.query.category = filter;
        self.recompute();
    }

    /// Sorts by `key` in `direction`.
    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.apply_sort(Some(SortSpec { key, direction }));
    }

    /// Removes any sort, restoring filtered order.
    pub fn clear_sort(&mut self) {
        self.apply_sort(None);
    }

    /// Applies a column click: the active ascending column flips to descending,
    /// anything else sorts ascending. Returns the sort now in effect.
    pub fn toggle_sort(&mut self, key: SortKey) -> SortSpec {
        let spec = SortSpec::toggled(self.query.sort, key);
        self.apply_sort(Some(spec));
        spec
    }

    fn apply_sort(&mut self, sort: Option<SortSpec>) {
        debug!("Sort set to {:?}", sort);
        self.query.sort = sort;
        self.recompute();
    }

    /// Adds a validated product at the front of the list and returns it.
    ///
    /// The new id is one past the current maximum, or [`FIRST_PRODUCT_ID`] when
    /// the list is empty. Fields the form does not collect get the configured
    /// placeholders, and a missing thumbnail becomes the placeholder image.
    pub fn add_product(&mut self, candidate: NewProduct) -> &Product {
        let id = self.next_id();
        let thumbnail = candidate
            .thumbnail()
            .map_or_else(|| self.defaults.thumbnail.clone(), str::to_string);

        let product = Product {
            id,
            title: candidate.title().to_string(),
            description: self.defaults.description.clone(),
            price: candidate.price(),
            discount_percentage: self.defaults.discount_percentage,
            rating: self.defaults.rating,
            stock: candidate.stock(),
            brand: self.defaults.brand.clone(),
            category: candidate.category().to_string(),
            images: vec![thumbnail.clone()],
            thumbnail,
        };

        info!("Adding product {} '{}'", product.id, product.title);
        self.products.insert(0, product);
        self.notifier
            .notify(Notification::normal("Success", "Product added successfully!"));
        self.recompute();
        &self.products[0]
    }

    /// One past the largest id. If the largest id is `u64::MAX`, the smallest
    /// unused id instead.
    fn next_id(&self) -> u64 {
        let Some(max) = self.products.iter().map(|p| p.id).max() else {
            return FIRST_PRODUCT_ID;
        };
        max.checked_add(1).unwrap_or_else(|| {
            let taken: HashSet<u64> = self.products.iter().map(|p| p.id).collect();
            warn!("Product id space exhausted at {}; reusing a free id", max);
            // The list is finite, so a free id always exists.
            (FIRST_PRODUCT_ID..)
                .find(|id| !taken.contains(id))
                .unwrap_or(FIRST_PRODUCT_ID)
        })
    }

    fn recompute(&mut self) {
        self.filtered = derive_view(&self.products, &self.query);
        trace!(
            "View recomputed: {} of {} products",
            self.filtered.len(),
            self.products.len()
        );
    }

    /// All products, newest additions first.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products after search, category filter and sort.
    #[must_use]
    pub fn filtered_products(&self) -> &[Product] {
        &self.filtered
    }

    /// Known categories, in remote order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The current search, category and sort.
    #[must_use]
    pub const fn query(&self) -> &QueryState {
        &self.query
    }

    /// True until the initial load has finished.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The load error shown to the user, if loading failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
