//! Category entity - A product category.
//!
//! The remote API has served categories both as bare slugs (`"beauty"`) and as
//! records (`{"slug", "name", "url"}`). Both decode into the same [`Category`];
//! a bare slug becomes `{slug, name: slug, url: ""}`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A product category, keyed by its slug
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCategory")]
pub struct Category {
    /// Stable identifier used for filtering and selection
    pub slug: String,
    /// Human-readable label
    pub name: String,
    /// Listing URL on the remote service, empty when unknown
    pub url: String,
}

/// Either shape the remote API sends.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Slug(String),
    Record {
        slug: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        url: String,
    },
}

impl From<RawCategory> for Category {
    fn from(raw: RawCategory) -> Self {
        match raw {
            RawCategory::Slug(slug) => Self::from_slug(slug),
            RawCategory::Record { slug, name, url } => Self {
                name: name.unwrap_or_else(|| slug.clone()),
                slug,
                url,
            },
        }
    }
}

impl Category {
    /// Builds a category from a bare slug.
    #[must_use]
    pub fn from_slug(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            name: slug.clone(),
            slug,
            url: String::new(),
        }
    }

    /// Label shown to the user. Bare slugs get their first letter capitalized.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.name != self.slug {
            return self.name.clone();
        }
        let mut chars = self.name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

/// Drops categories whose slug was already seen, keeping the first.
#[must_use]
pub fn dedup_by_slug(categories: Vec<Category>) -> Vec<Category> {
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .filter(|c| seen.insert(c.slug.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_bare_slug_normalizes() {
        let categories: Vec<Category> =
            serde_json::from_str(r#"["beauty", "home-decoration"]"#).unwrap();
        assert_eq!(categories[0], Category::from_slug("beauty"));
        assert_eq!(categories[1].name, "home-decoration");
        assert!(categories[1].url.is_empty());
    }

    #[test]
    fn test_record_decodes() {
        let json = r#"[{"slug": "beauty", "name": "Beauty", "url": "https://dummyjson.com/products/category/beauty"}]"#;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(categories[0].slug, "beauty");
        assert_eq!(categories[0].name, "Beauty");
        assert!(categories[0].url.ends_with("/beauty"));
    }

    #[test]
    fn test_mixed_shapes_decode() {
        let json = r#"["laptops", {"slug": "beauty", "name": "Beauty", "url": ""}]"#;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].slug, "laptops");
        assert_eq!(categories[1].name, "Beauty");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Category::from_slug("beauty").display_name(), "Beauty");
        let record = Category {
            slug: "mens-shirts".to_string(),
            name: "Mens Shirts".to_string(),
            url: String::new(),
        };
        assert_eq!(record.display_name(), "Mens Shirts");
        assert_eq!(Category::from_slug("").display_name(), "");
    }

    #[test]
    fn test_dedup_by_slug_keeps_first() {
        let categories = dedup_by_slug(vec![
            Category::from_slug("beauty"),
            Category::from_slug("laptops"),
            Category {
                slug: "beauty".to_string(),
                name: "Other".to_string(),
                url: String::new(),
            },
        ]);
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "beauty");
    }
}
