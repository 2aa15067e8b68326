//! Query state and view derivation.
//!
//! The filtered/sorted list the user sees is a pure function of the product
//! list and a [`QueryState`]. [`derive_view`] computes it; the store calls it
//! after every mutation and never edits the result in place.

use crate::entities::Product;
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Text spelling of [`CategoryFilter::All`] at the UI boundary.
pub const ALL_CATEGORIES: &str = "all-categories";

/// Which categories pass the filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category filter
    #[default]
    All,
    /// Only products whose category equals this slug exactly
    Slug(String),
}

impl CategoryFilter {
    /// Parses a selection value, mapping the sentinel (or an empty value) to `All`.
    #[must_use]
    pub fn from_selection(value: &str) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Slug(value.to_string())
        }
    }

    /// The selection value this filter corresponds to.
    #[must_use]
    pub fn as_selection(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Slug(slug) => slug,
        }
    }
}

/// A sortable product column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Product id
    Id,
    /// Product title
    Title,
    /// Description text
    Description,
    /// Unit price
    Price,
    /// Discount in percent
    DiscountPercentage,
    /// Average rating
    Rating,
    /// Units in stock
    Stock,
    /// Brand name
    Brand,
    /// Category slug
    Category,
    /// Thumbnail URL
    Thumbnail,
    /// Image list; has no ordering
    Images,
}

impl SortKey {
    /// The wire name of the column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Price => "price",
            Self::DiscountPercentage => "discountPercentage",
            Self::Rating => "rating",
            Self::Stock => "stock",
            Self::Brand => "brand",
            Self::Category => "category",
            Self::Thumbnail => "thumbnail",
            Self::Images => "images",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "id" => Self::Id,
            "title" => Self::Title,
            "description" => Self::Description,
            "price" => Self::Price,
            "discountPercentage" | "discount" => Self::DiscountPercentage,
            "rating" => Self::Rating,
            "stock" => Self::Stock,
            "brand" => Self::Brand,
            "category" => Self::Category,
            "thumbnail" => Self::Thumbnail,
            "images" => Self::Images,
            other => return Err(format!("Unknown sort column '{other}'")),
        };
        Ok(key)
    }
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// Sort column and direction, always set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Column to sort by
    pub key: SortKey,
    /// Order of the comparison
    pub direction: SortDirection,
}

impl SortSpec {
    /// The sort that results from clicking column `key` while `current` is applied.
    ///
    /// Clicking the active ascending column flips it to descending. Any other
    /// click sorts `key` ascending.
    #[must_use]
    pub fn toggled(current: Option<Self>, key: SortKey) -> Self {
        let direction = match current {
            Some(Self {
                key: active,
                direction: SortDirection::Ascending,
            }) if active == key => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        Self { key, direction }
    }
}

/// Everything the user controls about what the list shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryState {
    /// Case-insensitive title substring; empty means no search
    pub search_term: String,
    /// Selected category
    pub category: CategoryFilter,
    /// Applied sort, if any
    pub sort: Option<SortSpec>,
}

/// A product field's value, typed for comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    /// Text field
    Text(&'a str),
    /// Numeric field
    Number(f64),
    /// A field that has no ordering (e.g. the image list)
    Unsupported,
}

/// Returns the value of the column `key` in `product`.
#[must_use]
pub fn sort_value(product: &Product, key: SortKey) -> SortValue<'_> {
    match key {
        SortKey::Title => SortValue::Text(&product.title),
        SortKey::Description => SortValue::Text(&product.description),
        SortKey::Brand => SortValue::Text(&product.brand),
        SortKey::Category => SortValue::Text(&product.category),
        SortKey::Thumbnail => SortValue::Text(&product.thumbnail),
        #[allow(clippy::cast_precision_loss)]
        SortKey::Id => SortValue::Number(product.id as f64),
        SortKey::Price => SortValue::Number(product.price),
        SortKey::DiscountPercentage => SortValue::Number(product.discount_percentage),
        SortKey::Rating => SortValue::Number(product.rating),
        SortKey::Stock => SortValue::Number(f64::from(product.stock)),
        SortKey::Images => SortValue::Unsupported,
    }
}

/// Filters and sorts `products` according to `query`.
///
/// Filtering keeps the input order. Sorting is stable, so products that
/// compare equal stay in filtered order.
#[must_use]
pub fn derive_view(products: &[Product], query: &QueryState) -> Vec<Product> {
    let needle = query.search_term.to_lowercase();

    let mut result: Vec<Product> = products
        .iter()
        .filter(|p| needle.is_empty() || p.title_matches(&needle))
        .filter(|p| match &query.category {
            CategoryFilter::All => true,
            CategoryFilter::Slug(slug) => p.category == *slug,
        })
        .cloned()
        .collect();

    if let Some(spec) = query.sort {
        let collator = TextCollator::root();
        result.sort_by(|a, b| {
            let ordering =
                collator.compare_values(sort_value(a, spec.key), sort_value(b, spec.key));
            match spec.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    result
}

/// Root-locale (CLDR) collation for text columns.
pub struct TextCollator {
    collator: Option<Collator>,
}

impl TextCollator {
    /// Loads the root collation with default strength.
    #[must_use]
    pub fn root() -> Self {
        let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
            .inspect_err(|e| warn!("Root collation unavailable, using code point order: {}", e))
            .ok();
        Self { collator }
    }

    /// Compares two strings the way a user of the root locale expects:
    /// accents and case are secondary to the base letters, lowercase first.
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator
            .as_ref()
            .map_or_else(|| a.cmp(b), |c| c.compare(a, b))
    }

    /// Text compares by collation, numbers arithmetically.
    /// Anything else, including NaN, is equal.
    fn compare_values(&self, a: SortValue<'_>, b: SortValue<'_>) -> Ordering {
        match (a, b) {
            (SortValue::Text(a), SortValue::Text(b)) => self.compare(a, b),
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
            _ => Ordering::Equal,
        }
    }
}

/// Compares `a` and `b` with the root-locale collation.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    TextCollator::root().compare(a, b)
}
