use serde::Deserialize;

/// Number of fetch workers used when none is configured
pub const DEFAULT_WORKERS: usize = 4;

/// Main configuration structure for Hop-Crawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of concurrent fetch workers (the dispatch bound)
    pub workers: usize,

    /// Total timeout for a single page request (milliseconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout_ms: u64,

    /// Timeout for establishing a connection (milliseconds)
    #[serde(rename = "connect-timeout")]
    pub connect_timeout_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            request_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            user_agent: format!("hop-crawl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
