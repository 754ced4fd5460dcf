//! gpu-harvest: concurrent GPU listing harvester
//!
//! This crate drives one browsing session per retail source through paginated
//! search results, extracts structured listings from the rendered markup in a
//! bounded parallel pool, and ranks the merged listings by price.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod session;
pub mod sites;

use thiserror::Error;

/// Main error type for gpu-harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid product id '{0}': expected digits only")]
    InvalidProductId(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Failures raised by a browsing session (render failures)
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("No element matches selector '{0}'")]
    ElementNotFound(String),

    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("Session has no page open")]
    NotOpen,

    #[error("Session already closed")]
    Closed,
}

/// Failures that abort extraction of a single page
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Snapshot URL {0} does not belong to a known site")]
    UnknownSite(String),

    #[error("{site} markup changed: missing {element}")]
    MissingElement {
        site: sites::Site,
        element: &'static str,
    },
}

/// Result type alias for gpu-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{harvest, PageSnapshot};
pub use extract::{extract_records, Capacity, GpuRecord, Price, StockStatus};
pub use output::{aggregate, ResultSet};
pub use session::{Session, SessionFactory};
pub use sites::{build_frontier, ProductId, Site, SourceTarget};
