//! Hop-Crawl main entry point
//!
//! This is the command-line interface for the Hop-Crawl same-host crawler.

use anyhow::{Context, Result};
use clap::Parser;
use hop_crawl::config::{load_config, validate, Config};
use hop_crawl::crawler::{extract_hrefs, start};
use hop_crawl::output::{log_statistics, write_urls};
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Hop-Crawl: a bounded-concurrency, single-host web crawler
///
/// Hop-Crawl fetches the seed page, follows every link that stays on the
/// seed's host, and prints each page it found exactly once.
#[derive(Parser, Debug)]
#[command(name = "hop-crawl")]
#[command(version)]
#[command(about = "A bounded-concurrency, single-host web crawler", long_about = None)]
struct Cli {
    /// Absolute URL to start crawling from
    #[arg(value_name = "SEED", required_unless_present = "stdin")]
    seed: Option<String>,

    /// Read one HTML document from stdin and print its body's hrefs
    #[arg(long, conflicts_with_all = ["seed", "workers", "timeout", "config"])]
    stdin: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of concurrent fetch workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Per-request timeout in milliseconds
    #[arg(short, long, value_name = "MS")]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if cli.stdin {
        return print_stdin_hrefs();
    }

    let config = build_config(&cli)?;
    let seed = cli.seed.as_deref().context("missing seed URL")?;

    let handle = start(seed, &config.crawler).context("cannot start crawler")?;

    // Ctrl-C stops the crawl but still prints what was found
    let cancel = handle.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping crawl");
            cancel.cancel();
        }
    });

    let report = handle.wait().await?;
    log_statistics(&report.statistics, report.elapsed);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_urls(&report, &mut out)?;
    out.flush()?;

    if report.cancelled {
        tracing::warn!("Crawl was cancelled; the URL list is partial");
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the URL list.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hop_crawl=info,warn"),
            1 => EnvFilter::new("hop_crawl=debug,info"),
            2 => EnvFilter::new("hop_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("cannot load config {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout_ms = timeout;
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Handles --stdin: prints every href under <body>, unnormalized
fn print_stdin_hrefs() -> Result<()> {
    let mut html = Vec::new();
    io::stdin()
        .read_to_end(&mut html)
        .context("cannot read stdin")?;

    let hrefs = extract_hrefs(&html).context("cannot parse HTML")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for href in hrefs {
        writeln!(out, "{}", href)?;
    }
    out.flush()?;

    Ok(())
}
