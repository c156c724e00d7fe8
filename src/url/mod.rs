//! URL handling module for Hop-Crawl
//!
//! This module provides seed validation, same-host checks and link
//! normalization. The canonical string produced by [`normalize_link`] is the
//! identity under which the frontier deduplicates pages.

mod host;
mod normalize;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use host::same_host;
pub use normalize::{clean_path, normalize_link};

/// Parses and validates the seed URL of a crawl
///
/// The seed must be absolute, use the `http` or `https` scheme and name a
/// host. Anything else is a fatal startup error.
///
/// # Examples
///
/// ```
/// use hop_crawl::url::parse_seed;
///
/// assert!(parse_seed("http://x.test/").is_ok());
/// assert!(parse_seed("/relative").is_err());
/// assert!(parse_seed("ftp://x.test/").is_err());
/// ```
pub fn parse_seed(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Returns the canonical form of a validated seed
///
/// The seed is normalized against itself, so it enters the frontier under
/// the same key any link back to it will produce.
pub fn canonicalize_seed(seed: &Url) -> Result<String, UrlError> {
    normalize_link(seed.as_str(), seed)?
        .ok_or_else(|| UrlError::Malformed(seed.to_string()))
}
