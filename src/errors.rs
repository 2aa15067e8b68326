//! Unified error types for the catalog manager.

use crate::core::validation::ValidationErrors;
use thiserror::Error;

/// Every failure the catalog can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request did not complete, or completed with a non-success status.
    #[error("Network error: {message}")]
    Network {
        /// What went wrong
        message: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("Decode error: {message}")]
    Decode {
        /// What went wrong
        message: String,
    },

    /// One or more add-product form fields were rejected.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A console command could not be understood.
    #[error("Command error: {message}")]
    Command {
        /// What was wrong with it
        message: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Reading console input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Result alias using the catalog [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
