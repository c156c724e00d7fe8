//! Hop-Crawl: a bounded-concurrency, single-host web crawler
//!
//! Starting from a seed URL, the crawler fetches pages over HTTP, extracts
//! same-host links and visits every discovered page exactly once. All crawl
//! state is owned by a single coordinator task; a fixed pool of workers does
//! the fetching and parsing.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Hop-Crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL: {0}")]
    Seed(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTML parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crawl task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
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

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Malformed URL: {0}")]
    Malformed(String),

    #[error("Scheme is {found}, it was {expected}")]
    SchemeMismatch { found: String, expected: String },
}

/// HTML page parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("body not found")]
    BodyNotFound,

    #[error("cannot tokenize HTML: {0}")]
    Html(String),
}

/// Result type alias for Hop-Crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, CrawlerConfig};
pub use crawler::{start, CrawlHandle};
pub use output::{CrawlReport, PageRecord};
pub use state::{Frontier, VisitState};
pub use crate::url::{normalize_link, parse_seed};
