//! Crawler coordinator - the single owner of crawl state
//!
//! The coordinator task owns the scheduler (and through it the frontier and
//! the in-flight set). Every mutation arrives as a message on one queue and
//! is handled to completion before the next message is read, so no lock
//! guards the frontier.
//!
//! After each message the coordinator dispatches as much work as capacity
//! allows, then checks the termination rule: no unvisited URL and nothing
//! in flight. When it holds, the dispatch queue is closed (stopping every
//! worker) and the final report is handed to whoever awaits the crawl.

use crate::config::{validate_crawler_config, CrawlerConfig};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::scheduler::{ScheduleError, Scheduler};
use crate::crawler::worker::{spawn_workers, PageReport};
use crate::output::CrawlReport;
use crate::url::{canonicalize_seed, parse_seed};
use crate::CrawlError;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Log a progress line every this many reports
const PROGRESS_INTERVAL: usize = 10;

/// Messages processed by the coordinator, one at a time
#[derive(Debug)]
pub enum Message {
    /// Dispatch unvisited URLs up to capacity
    Schedule,

    /// A worker finished a URL
    Report(PageReport),
}

/// Main crawler coordinator structure
pub struct Coordinator {
    scheduler: Scheduler,
    inbox: mpsc::UnboundedReceiver<Message>,
    dispatch: Option<mpsc::Sender<String>>,
    cancel: CancellationToken,
    seed: String,
    reports_seen: usize,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `seed` - Canonical seed URL
    /// * `capacity` - Maximum number of concurrent fetches
    /// * `inbox` - Queue of messages from workers
    /// * `dispatch` - Queue feeding the worker pool
    /// * `cancel` - Token that stops the crawl early
    pub fn new(
        seed: String,
        capacity: usize,
        inbox: mpsc::UnboundedReceiver<Message>,
        dispatch: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            scheduler: Scheduler::new(seed.clone(), capacity),
            inbox,
            dispatch: Some(dispatch),
            cancel,
            seed,
            reports_seen: 0,
        }
    }

    /// Runs the message loop until the crawl finishes or is cancelled
    pub async fn run(mut self) -> CrawlReport {
        let started_at = Utc::now();
        let start_time = Instant::now();
        let mut cancelled = false;

        tracing::info!(
            "Starting crawl of {} with {} workers",
            self.seed,
            self.scheduler.capacity()
        );

        // The seed is already in the frontier; the first round needs no trigger
        let mut next = Some(Message::Schedule);

        loop {
            let message = match next.take() {
                Some(message) => message,
                None => tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => {
                        tracing::warn!(
                            "Crawl cancelled with {} fetches in flight",
                            self.scheduler.in_flight()
                        );
                        cancelled = true;
                        break;
                    }
                    message = self.inbox.recv() => match message {
                        Some(message) => message,
                        None => {
                            tracing::error!(
                                "All workers stopped with {} fetches in flight",
                                self.scheduler.in_flight()
                            );
                            break;
                        }
                    },
                },
            };

            if let Err(e) = self.handle(message).await {
                tracing::error!("crawler error: {}", e);
                if matches!(e, ScheduleError::DispatchClosed { .. }) {
                    break;
                }
            }

            if self.scheduler.is_finished() {
                break;
            }
        }

        // Closing the dispatch queue stops every idle worker
        self.dispatch = None;

        let statistics = self.scheduler.statistics();
        let frontier = self.scheduler.into_frontier();
        let report = CrawlReport::from_frontier(
            self.seed,
            &frontier,
            statistics,
            started_at,
            start_time.elapsed(),
            cancelled,
        );

        tracing::info!(
            "Crawl finished: {} URLs known, {} fetched in {:?}",
            report.len(),
            report.statistics.dispatched,
            report.elapsed
        );

        report
    }

    /// Handles one message, then dispatches whatever capacity allows
    async fn handle(&mut self, message: Message) -> Result<(), ScheduleError> {
        match message {
            Message::Schedule => {}
            Message::Report(report) => {
                let url = report.url.clone();
                let added = self.scheduler.record_report(report)?;
                self.reports_seen += 1;

                tracing::debug!(
                    "Report for {}: {} new URLs, {} in flight",
                    url,
                    added,
                    self.scheduler.in_flight()
                );

                if self.reports_seen % PROGRESS_INTERVAL == 0 {
                    tracing::info!(
                        "Progress: {} pages done, {} known, {} waiting",
                        self.reports_seen,
                        self.scheduler.frontier().len(),
                        self.scheduler.frontier().unvisited_count()
                    );
                }
            }
        }

        self.schedule().await
    }

    /// Dispatches unvisited URLs until none remain or capacity is reached
    async fn schedule(&mut self) -> Result<(), ScheduleError> {
        let Some(dispatch) = &self.dispatch else {
            return Ok(());
        };

        while let Some(url) = self.scheduler.next_dispatch() {
            tracing::trace!("Dispatching {}", url);

            // Queued URLs are a subset of the in-flight set, which never
            // exceeds the queue's capacity, so this never waits
            if dispatch.send(url).await.is_err() {
                return Err(ScheduleError::DispatchClosed {
                    in_flight: self.scheduler.in_flight(),
                });
            }
        }

        Ok(())
    }
}

/// Handle to a running crawl
pub struct CrawlHandle {
    coordinator: JoinHandle<CrawlReport>,
    workers: Vec<JoinHandle<()>>,
    cancel: CancellationToken,
}

impl CrawlHandle {
    /// Stops the crawl early
    ///
    /// Workers abandon their current fetch and [`CrawlHandle::wait`] returns a
    /// report with `cancelled` set.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns a token that cancels this crawl when triggered
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Waits for the crawl to finish and returns the final report
    ///
    /// Once this returns, the coordinator and every worker have stopped.
    pub async fn wait(self) -> Result<CrawlReport, CrawlError> {
        let report = self.coordinator.await?;

        for worker in self.workers {
            if let Err(e) = worker.await {
                tracing::warn!("Worker task failed: {}", e);
            }
        }

        Ok(report)
    }
}

/// Starts a crawl from `seed`
///
/// Validates the configuration and seed, then spawns the coordinator and
/// `config.workers` workers on the current tokio runtime.
///
/// # Returns
///
/// * `Ok(CrawlHandle)` - The crawl is running
/// * `Err(CrawlError)` - Invalid seed or configuration, or the HTTP client
///   could not be built; nothing was started
///
/// # Example
///
/// ```no_run
/// use hop_crawl::config::CrawlerConfig;
///
/// # async fn example() -> Result<(), hop_crawl::CrawlError> {
/// let handle = hop_crawl::start("http://x.test/", &CrawlerConfig::default())?;
/// let report = handle.wait().await?;
/// for url in report.urls() {
///     println!("{}", url);
/// }
/// # Ok(())
/// # }
/// ```
pub fn start(seed: &str, config: &CrawlerConfig) -> Result<CrawlHandle, CrawlError> {
    validate_crawler_config(config)?;
    let seed_url = parse_seed(seed)?;
    let canonical = canonicalize_seed(&seed_url)?;
    let client = build_http_client(config)?;

    let cancel = CancellationToken::new();
    let (dispatch_tx, dispatch_rx) = mpsc::channel(config.workers);
    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

    let workers = spawn_workers(
        config.workers,
        client,
        Arc::new(Mutex::new(dispatch_rx)),
        inbox_tx,
        cancel.clone(),
    );

    let coordinator = Coordinator::new(
        canonical,
        config.workers,
        inbox_rx,
        dispatch_tx,
        cancel.clone(),
    );

    Ok(CrawlHandle {
        coordinator: tokio::spawn(coordinator.run()),
        workers,
        cancel,
    })
}
