//! Error types for Recruit

use crate::scraper::ScraperError;
use thiserror::Error;

/// Recruit error type
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML configuration could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Tool arguments failed schema validation
    #[error("Invalid arguments: {0}")]
    Validation(String),

    /// The remote lead scraper failed
    #[error("Failed to fetch prospects from Apify: {0}")]
    Scraper(#[from] ScraperError),

    /// Resource URI not present in the widget registry
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for Recruit operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::ConfigError(format!("Invalid glob pattern: {}", err))
    }
}

impl From<glob::GlobError> for Error {
    fn from(err: glob::GlobError) -> Self {
        Error::Io(err.into_error())
    }
}
