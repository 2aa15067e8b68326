//! Entity module - The catalog's data model.
//! Products and categories as the remote API describes them, normalized into
//! the shapes the store works with.

pub mod category;
pub mod product;

pub use category::Category;
pub use product::{Product, ProductsPage};
