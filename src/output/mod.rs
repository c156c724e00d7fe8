//! Output module for crawl results
//!
//! This module handles:
//! - The final crawl report built from the frontier snapshot
//! - Writing the list of known URLs
//! - Recording crawl statistics

pub mod stats;

pub use stats::{log_statistics, CrawlStatistics};

use crate::state::{Frontier, VisitState};
use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::time::Duration;

/// One URL known to the crawl at termination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Canonical URL
    pub url: String,

    /// Visit state when the crawl stopped
    pub state: VisitState,
}

/// Final result of a crawl
///
/// Built by the coordinator after its message loop has stopped, so no
/// further mutation of the underlying frontier is possible.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Canonical seed URL
    pub seed: String,

    /// Every known URL, in discovery order
    pub pages: Vec<PageRecord>,

    /// Crawl counters
    pub statistics: CrawlStatistics,

    /// When the coordinator started
    pub started_at: DateTime<Utc>,

    /// When the coordinator stopped
    pub finished_at: DateTime<Utc>,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,

    /// True if the crawl was stopped before reaching termination
    pub cancelled: bool,
}

impl CrawlReport {
    /// Builds a report from a frontier snapshot
    pub fn from_frontier(
        seed: String,
        frontier: &Frontier,
        statistics: CrawlStatistics,
        started_at: DateTime<Utc>,
        elapsed: Duration,
        cancelled: bool,
    ) -> Self {
        let pages = frontier
            .iter()
            .map(|(url, state)| PageRecord {
                url: url.to_string(),
                state,
            })
            .collect();

        Self {
            seed,
            pages,
            statistics,
            started_at,
            finished_at: Utc::now(),
            elapsed,
            cancelled,
        }
    }

    /// Iterates over every known URL in discovery order
    pub fn urls(&self) -> impl Iterator<Item = &str> + '_ {
        self.pages.iter().map(|page| page.url.as_str())
    }

    /// Returns true if the URL is known to the crawl
    pub fn contains(&self, url: &str) -> bool {
        self.pages.iter().any(|page| page.url == url)
    }

    /// Number of known URLs
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if no URL is known
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Returns true if the crawl ran to completion and visited every URL
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.pages.iter().all(|page| page.state.is_visited())
    }
}

/// Writes every known URL, one per line
pub fn write_urls<W: Write>(report: &CrawlReport, out: &mut W) -> io::Result<()> {
    for url in report.urls() {
        writeln!(out, "{}", url)?;
    }
    Ok(())
}
