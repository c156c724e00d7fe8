//! Configuration module for Hop-Crawl
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every field has a default, so a crawl can run with
//! no file at all.
//!
//! # Example
//!
//! ```no_run
//! use hop_crawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("hop-crawl.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, DEFAULT_WORKERS};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, validate_crawler_config};
