//! Radio error types
use thiserror::Error;
use yurt_core::CatalogError;

pub type Result<T> = std::result::Result<T, RadioError>;

#[derive(Debug, Error)]
pub enum RadioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
