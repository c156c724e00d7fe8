//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - HTML parsing and link extraction
//! - Dispatch scheduling under a concurrency bound
//! - The coordinator that owns crawl state and detects termination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;
mod worker;

pub use coordinator::{start, Coordinator, CrawlHandle, Message};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use parser::{extract_hrefs, parse_page, ParsedPage};
pub use scheduler::{ScheduleError, Scheduler};
pub use worker::{process_url, PageReport};

use crate::config::CrawlerConfig;
use crate::output::CrawlReport;
use crate::CrawlError;

/// Runs a complete crawl and waits for it to finish
///
/// This is the main entry point for a crawl. It will:
/// 1. Validate the seed and configuration
/// 2. Spawn the coordinator and worker pool
/// 3. Wait until no URL is unvisited and no fetch is in flight
///
/// # Arguments
///
/// * `seed` - Absolute HTTP(S) URL to start from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Every URL discovered on the seed's host
/// * `Err(CrawlError)` - The crawl could not start
pub async fn crawl(seed: &str, config: &CrawlerConfig) -> Result<CrawlReport, CrawlError> {
    start(seed, config)?.wait().await
}
