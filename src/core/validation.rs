//! Add-product validation.
//!
//! [`validate`] turns the raw text of the add-product form into a [`NewProduct`].
//! `NewProduct` has no public constructor, so anything the store is handed
//! has been through these rules.

use crate::entities::Category;
use std::collections::BTreeMap;
use std::fmt;

/// Raw add-product form input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// Product title
    pub title: String,
    /// Unit price, as typed
    pub price: String,
    /// Selected category slug
    pub category: String,
    /// Units in stock, as typed
    pub stock: String,
    /// Image URL; blank means none
    pub thumbnail: String,
}

/// A validated product-creation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    title: String,
    price: f64,
    category: String,
    stock: u32,
    thumbnail: Option<String>,
}

impl NewProduct {
    /// Product title, at least three characters.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unit price, finite and greater than zero.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Slug of a known category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Units in stock.
    #[must_use]
    pub const fn stock(&self) -> u32 {
        self.stock
    }

    /// The thumbnail URL, if the user supplied one.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }
}

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    /// Product title
    Title,
    /// Unit price
    Price,
    /// Category selection
    Category,
    /// Units in stock
    Stock,
    /// Image URL
    Thumbnail,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::Category => "category",
            Self::Stock => "stock",
            Self::Thumbnail => "thumbnail",
        })
    }
}

/// Per-field error messages, one per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<Field, String>,
}

impl ValidationErrors {
    fn add(&mut self, field: Field, message: &str) {
        self.fields.insert(field, message.to_string());
    }

    /// The message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Failing fields in form order, with their messages.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

const TITLE_MIN_CHARS: usize = 3;

/// Validates `draft` against the add-product rules.
///
/// `categories` is the known category list; the selected category must be one of them.
///
/// # Errors
/// Returns every failing field with its message:
/// - title shorter than three characters
/// - price not a finite number greater than zero
/// - category empty or unknown
/// - stock not a whole number of zero or more
/// - thumbnail present but not an absolute URL
pub fn validate(
    draft: &ProductDraft,
    categories: &[Category],
) -> std::result::Result<NewProduct, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if draft.title.chars().count() < TITLE_MIN_CHARS {
        errors.add(Field::Title, "Title must be at least 3 characters");
    }

    let price = draft
        .price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0);
    if price.is_none() {
        errors.add(Field::Price, "Price must be a positive number");
    }

    let category = draft.category.trim();
    if category.is_empty() || !categories.iter().any(|c| c.slug == category) {
        errors.add(Field::Category, "Please select a category");
    }

    let stock = parse_stock(&draft.stock);
    if stock.is_none() {
        errors.add(Field::Stock, "Stock must be a non-negative integer");
    }

    let thumbnail = draft.thumbnail.trim();
    let thumbnail = if thumbnail.is_empty() {
        None
    } else if reqwest::Url::parse(thumbnail).is_ok() {
        Some(thumbnail.to_string())
    } else {
        errors.add(Field::Thumbnail, "Please enter a valid image URL");
        None
    };

    match (price, stock) {
        (Some(price), Some(stock)) if errors.is_empty() => Ok(NewProduct {
            title: draft.title.clone(),
            price,
            category: category.to_string(),
            stock,
            thumbnail,
        }),
        _ => Err(errors),
    }
}

/// Accepts whole numbers written either as integers or as `5.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_stock(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(stock) = raw.parse::<u32>() {
        return Some(stock);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{draft, sample_categories};

    #[test]
    fn test_accepts_valid_draft_without_thumbnail() {
        let categories = sample_categories();
        let product = validate(&draft("Keyboard", "19.99", "electronics", "0", ""), &categories)
            .unwrap();
        assert_eq!(product.title(), "Keyboard");
        assert_eq!(product.price(), 19.99);
        assert_eq!(product.category(), "electronics");
        assert_eq!(product.stock(), 0);
        assert!(product.thumbnail().is_none());
    }

    #[test]
    fn test_accepts_valid_thumbnail() {
        let categories = sample_categories();
        let product = validate(
            &draft("Keyboard", "19.99", "electronics", "3", "https://cdn.example.com/k.png"),
            &categories,
        )
        .unwrap();
        assert_eq!(product.thumbnail(), Some("https://cdn.example.com/k.png"));
    }

    #[test]
    fn test_rejects_each_field_with_distinct_message() {
        let categories = sample_categories();
        let errors = validate(&draft("ab", "0", "electronics", "-1", "not a url"), &categories)
            .unwrap_err();

        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.get(Field::Title),
            Some("Title must be at least 3 characters")
        );
        assert_eq!(errors.get(Field::Price), Some("Price must be a positive number"));
        assert_eq!(
            errors.get(Field::Stock),
            Some("Stock must be a non-negative integer")
        );
        assert_eq!(
            errors.get(Field::Thumbnail),
            Some("Please enter a valid image URL")
        );
        assert!(errors.get(Field::Category).is_none());
    }

    #[test]
    fn test_rejects_missing_or_unknown_category() {
        let categories = sample_categories();
        let errors = validate(&draft("Keyboard", "5", "", "1", ""), &categories).unwrap_err();
        assert_eq!(errors.get(Field::Category), Some("Please select a category"));

        let errors = validate(&draft("Keyboard", "5", "spaceships", "1", ""), &categories)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get(Field::Category).is_some());
    }

    #[test]
    fn test_price_must_be_a_finite_positive_number() {
        let categories = sample_categories();
        for bad in ["", "abc", "-3", "NaN", "inf"] {
            let errors =
                validate(&draft("Keyboard", bad, "electronics", "1", ""), &categories).unwrap_err();
            assert!(errors.get(Field::Price).is_some(), "price {bad:?} accepted");
        }
    }

    #[test]
    fn test_stock_must_be_whole() {
        assert_eq!(parse_stock("4"), Some(4));
        assert_eq!(parse_stock("4.0"), Some(4));
        assert_eq!(parse_stock("4.5"), None);
        assert_eq!(parse_stock("-1"), None);
        assert_eq!(parse_stock(""), None);
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        let categories = sample_categories();
        assert!(validate(&draft("äö", "1", "electronics", "1", ""), &categories).is_err());
        assert!(validate(&draft("äöü", "1", "electronics", "1", ""), &categories).is_ok());
    }

    #[test]
    fn test_errors_display_lists_fields() {
        let categories = sample_categories();
        let errors = validate(&draft("ab", "1", "electronics", "1", ""), &categories).unwrap_err();
        assert_eq!(errors.to_string(), "title: Title must be at least 3 characters");
    }
}
