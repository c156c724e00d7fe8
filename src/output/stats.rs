//! Crawl statistics
//!
//! Counters are maintained by the scheduler while the crawl runs and copied
//! into the final report.

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Total number of URLs known to the frontier
    pub total_urls: usize,

    /// Number of URLs handed to a worker
    pub dispatched: usize,

    /// Pages fetched and parsed
    pub succeeded: usize,

    /// Pages that failed to fetch or parse
    pub failed: usize,

    /// Links reported by workers, before deduplication
    pub links_reported: usize,

    /// Highest number of fetches in flight at once
    pub peak_in_flight: usize,
}

impl CrawlStatistics {
    /// Number of pages whose result has been reported
    pub fn reported(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Reported pages per second over `elapsed`
    pub fn pages_per_second(&self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            self.reported() as f64 / secs
        } else {
            0.0
        }
    }
}

/// Logs a statistics summary at info level
pub fn log_statistics(stats: &CrawlStatistics, elapsed: Duration) {
    tracing::info!("=== Crawl Statistics ===");
    tracing::info!("  URLs known: {}", stats.total_urls);
    tracing::info!("  Pages fetched: {}", stats.dispatched);

    let failure_rate = if stats.reported() > 0 {
        (stats.failed as f64 / stats.reported() as f64) * 100.0
    } else {
        0.0
    };
    tracing::info!(
        "  Succeeded: {}, failed: {} ({:.1}%)",
        stats.succeeded,
        stats.failed,
        failure_rate
    );
    tracing::info!("  Links reported: {}", stats.links_reported);
    tracing::info!("  Peak concurrency: {}", stats.peak_in_flight);
    tracing::info!(
        "  Elapsed: {:?} ({:.2} pages/sec)",
        elapsed,
        stats.pages_per_second(elapsed)
    );
}
