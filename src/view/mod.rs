//! View layer - Text rendering of the catalog and the console intents that drive it.
//!
//! The view reads store state and turns user input into store calls. It never
//! touches catalog state directly, and add submissions are validated here
//! before the store sees them.

/// Console intents: parsing and dispatch
pub mod commands;
/// Dashboard rendering
pub mod render;

pub use commands::{Intent, Outcome, dispatch, parse_intent};
pub use render::{Screen, notification_line, render};
