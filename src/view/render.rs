//! Dashboard rendering.

use crate::{
    core::{
        notify::{Notification, Severity},
        query::{CategoryFilter, SortDirection, SortKey},
        store::CatalogStore,
    },
    entities::Product,
};
use chrono::Local;
use std::fmt::Write;

/// What the dashboard is showing. An empty result is its own state, distinct
/// from loading and from a failed load.
#[derive(Debug, PartialEq)]
pub enum Screen<'a> {
    /// Initial load still running
    Loading,
    /// Initial load failed
    Errored(&'a str),
    /// Loaded, but nothing matches the query
    Empty,
    /// Products to list
    Table(&'a [Product]),
}

impl<'a> Screen<'a> {
    /// The screen `store` is currently in.
    #[must_use]
    pub fn of(store: &'a CatalogStore) -> Self {
        if store.is_loading() {
            Self::Loading
        } else if let Some(message) = store.error() {
            Self::Errored(message)
        } else if store.filtered_products().is_empty() {
            Self::Empty
        } else {
            Self::Table(store.filtered_products())
        }
    }
}

const COLUMNS: [(SortKey, &str, usize); 4] = [
    (SortKey::Title, "Title", 36),
    (SortKey::Category, "Category", 20),
    (SortKey::Price, "Price", 10),
    (SortKey::Stock, "Stock", 6),
];

/// Renders the toolbar and the product table (or the state message) as text.
#[must_use]
pub fn render(store: &CatalogStore) -> String {
    let mut out = String::new();
    let query = store.query();

    let category = match &query.category {
        CategoryFilter::All => "All categories".to_string(),
        CategoryFilter::Slug(slug) => store
            .categories()
            .iter()
            .find(|c| &c.slug == slug)
            .map_or_else(|| slug.clone(), crate::entities::Category::display_name),
    };
    let _ = writeln!(
        out,
        "Search: {:?} | Category: {} | Sort: {}",
        query.search_term,
        category,
        query.sort.map_or_else(
            || "none".to_string(),
            |s| format!("{} {}", s.key, arrow(s.direction))
        )
    );

    match Screen::of(store) {
        Screen::Loading => out.push_str("Loading products...\n"),
        Screen::Errored(message) => {
            let _ = writeln!(out, "Error: {message}");
        }
        Screen::Empty => out.push_str("No products found.\n"),
        Screen::Table(products) => {
            let sorted = query.sort;
            let mut header = String::new();
            for (key, label, width) in COLUMNS {
                let label = match sorted {
                    Some(s) if s.key == key => format!("{label} {}", arrow(s.direction)),
                    _ => label.to_string(),
                };
                let _ = write!(header, "{label:<width$} ");
            }
            let _ = writeln!(out, "{}", header.trim_end());
            for p in products {
                let _ = writeln!(
                    out,
                    "{:<36} {:<20} {:<10} {}",
                    truncate(&p.title, 36),
                    truncate(&p.category, 20),
                    format!("${:.2}", p.price),
                    p.stock
                );
            }
            let _ = writeln!(
                out,
                "{} of {} products",
                products.len(),
                store.products().len()
            );
        }
    }

    out
}

/// One line for a notification: severity marker, local time, title and body.
#[must_use]
pub fn notification_line(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Normal => '*',
        Severity::Error => '!',
    };
    format!(
        "{marker} [{}] {}: {}",
        notification.raised_at.with_timezone(&Local).format("%H:%M:%S"),
        notification.title,
        notification.description
    )
}

const fn arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "↑",
        SortDirection::Descending => "↓",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}
