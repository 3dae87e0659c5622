//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The recipe or configuration API could not be reached or answered badly.
    #[error("Network error: {0}")]
    Api(#[from] mixology_api::Error),

    /// The API call succeeded but returned no cocktail.
    #[error("No cocktail found")]
    NotFound,

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if the error comes from the network layer.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Returns true if the API answered with no cocktail.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
