/// Catalog error types for Yurt Radio
use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors produced while talking to the Catalog Service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Connection refused, DNS failure, reset mid-body
    #[error("Catalog unreachable: {0}")]
    Unreachable(String),

    /// The request did not complete within the configured timeout
    #[error("Catalog request timed out")]
    Timeout,

    /// Non-success status from the service
    #[error("Catalog error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Body could not be decoded
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request succeeded but the catalog had no track to offer
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// Base URL rejected at client construction
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

impl CatalogError {
    /// True when the catalog answered but had nothing to play
    pub fn is_empty_catalog(&self) -> bool {
        matches!(self, CatalogError::EmptyCatalog)
    }
}
