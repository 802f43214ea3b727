use thiserror::Error;

/// Catalog error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Structure error: {0}")]
    StructureError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Sort key error: {0}")]
    SortKeyError(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

pub mod limitless;
pub mod provider_base;

pub use provider_base::{BaseProvider, PageFetcher};

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::NetworkError(err.to_string())
    }
}

impl From<config::ConfigError> for CatalogError {
    fn from(err: config::ConfigError) -> Self {
        CatalogError::ConfigurationError(err.to_string())
    }
}
