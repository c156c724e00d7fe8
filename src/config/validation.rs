use crate::config::types::{Config, CrawlerConfig};
use crate::ConfigError;

/// Upper bound on the worker pool size
const MAX_WORKERS: usize = 256;

/// Lower bound on any configured timeout (milliseconds)
const MIN_TIMEOUT_MS: u64 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)
}

/// Validates crawler configuration
pub fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.request_timeout_ms < MIN_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be >= {}ms, got {}ms",
            MIN_TIMEOUT_MS, config.request_timeout_ms
        )));
    }

    if config.connect_timeout_ms < MIN_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "connect-timeout must be >= {}ms, got {}ms",
            MIN_TIMEOUT_MS, config.connect_timeout_ms
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
