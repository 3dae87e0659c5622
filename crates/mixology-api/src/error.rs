//! Error types for API requests.

/// Result type alias for API requests.
pub type Result<T> = std::result::Result<T, Error>;

/// API request error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure, timeout, or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}
