//! Core catalog logic - framework-agnostic loading, querying, validation and state.

/// Remote catalog client and the `CatalogSource` seam
pub mod client;
/// Fire-and-forget user notifications
pub mod notify;
/// Query state and the pure filter/sort derivation
pub mod query;
/// The catalog store: owner of all catalog state
pub mod store;
/// Add-product form validation
pub mod validation;
