//! Fetch worker pool
//!
//! A fixed number of tokio tasks share one dispatch queue. Each worker takes
//! a URL, fetches and parses it, and reports the outcome to the coordinator.
//! Workers never see the frontier; every failure below this level becomes a
//! report with no links.
//!
//! A worker exits when the dispatch queue is closed, when the coordinator's
//! report queue is gone, or when the crawl is cancelled.

use crate::crawler::coordinator::Message;
use crate::crawler::fetcher::{fetch_page, FetchResult};
use crate::crawler::parser::parse_page;
use crate::url::same_host;
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Receiving end of the dispatch queue, shared by every worker
pub(crate) type DispatchQueue = Arc<Mutex<mpsc::Receiver<String>>>;

/// Outcome of processing one dispatched URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// The dispatched URL this report answers
    pub url: String,

    /// Canonical links discovered on the page
    pub links: Vec<String>,

    /// Whether the page was fetched and parsed
    pub succeeded: bool,
}

impl PageReport {
    /// Report for a page that was fetched and parsed
    pub fn success(url: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            url: url.into(),
            links,
            succeeded: true,
        }
    }

    /// Report for a page that could not be fetched or parsed
    pub fn failure(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            links: Vec::new(),
            succeeded: false,
        }
    }
}

/// Spawns `count` workers reading from `queue`
///
/// Every worker holds a clone of `reports`; once all workers have exited the
/// coordinator's message queue closes.
pub(crate) fn spawn_workers(
    count: usize,
    client: Client,
    queue: DispatchQueue,
    reports: mpsc::UnboundedSender<Message>,
    cancel: CancellationToken,
) -> Vec<JoinHandle<()>> {
    spawn_workers_with(count, queue, reports, cancel, move |url| {
        let client = client.clone();
        async move { process_url(&client, &url).await }
    })
}

/// Spawns `count` workers that run `process` on every dispatched URL
pub(crate) fn spawn_workers_with<P, F>(
    count: usize,
    queue: DispatchQueue,
    reports: mpsc::UnboundedSender<Message>,
    cancel: CancellationToken,
    process: P,
) -> Vec<JoinHandle<()>>
where
    P: Fn(String) -> F + Clone + Send + 'static,
    F: Future<Output = PageReport> + Send + 'static,
{
    (0..count)
        .map(|id| {
            tokio::spawn(run_worker(
                id,
                Arc::clone(&queue),
                reports.clone(),
                cancel.clone(),
                process.clone(),
            ))
        })
        .collect()
}

/// Worker loop: receive, process, report
///
/// Each URL is processed in its own task. If that task panics the URL is
/// still answered with a failure report, so the coordinator never waits on
/// a fetch that will not finish.
async fn run_worker<P, F>(
    id: usize,
    queue: DispatchQueue,
    reports: mpsc::UnboundedSender<Message>,
    cancel: CancellationToken,
    process: P,
) where
    P: Fn(String) -> F,
    F: Future<Output = PageReport> + Send + 'static,
{
    tracing::trace!(worker = id, "Worker started");

    loop {
        let next = {
            let mut receiver = queue.lock().await;
            tokio::select! {
                _ = cancel.cancelled() => None,
                url = receiver.recv() => url,
            }
        };

        let Some(url) = next else {
            break;
        };

        tracing::debug!(worker = id, "Fetching {}", url);

        let mut task = tokio::spawn(process(url.clone()));
        let report = tokio::select! {
            _ = cancel.cancelled() => {
                task.abort();
                break;
            }
            joined = &mut task => match joined {
                Ok(report) => report,
                Err(e) => {
                    tracing::error!(worker = id, "worker error: processing {} failed: {}", url, e);
                    PageReport::failure(url.as_str())
                }
            },
        };

        if reports.send(Message::Report(report)).is_err() {
            tracing::debug!(worker = id, "Coordinator gone, dropping report for {}", url);
            break;
        }
    }

    tracing::trace!(worker = id, "Worker exiting");
}

/// Fetches and parses one URL
///
/// Never fails: transport errors, non-2xx statuses and parse errors are
/// logged and produce a report with no links.
///
/// Relative links are resolved against the URL the page was finally served
/// from, so `/docs` redirected to `/docs/` resolves `intro` to `/docs/intro`.
pub async fn process_url(client: &Client, url: &str) -> PageReport {
    let dispatched = match Url::parse(url) {
        Ok(dispatched) => dispatched,
        Err(e) => {
            tracing::warn!("worker error: cannot parse dispatched URL {}: {}", url, e);
            return PageReport::failure(url);
        }
    };

    match fetch_page(client, url).await {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            tracing::debug!("Fetched {} (HTTP {}, {} bytes)", final_url, status_code, body.len());
            let base = link_base(&dispatched, &final_url);
            match parse_page(&body, &base) {
                Ok(page) => {
                    tracing::debug!("Found {} links on {}", page.links.len(), url);
                    PageReport::success(url, page.links)
                }
                Err(e) => {
                    tracing::warn!("worker error: parser: {}: {}", url, e);
                    PageReport::failure(url)
                }
            }
        }
        FetchResult::HttpError { status_code } => {
            tracing::warn!("worker error: http: {} returned HTTP {}", url, status_code);
            PageReport::failure(url)
        }
        FetchResult::NetworkError { error } => {
            tracing::warn!("worker error: http: cannot GET {}: {}", url, error);
            PageReport::failure(url)
        }
    }
}

/// Picks the base URL for a fetched page's relative links
///
/// The final URL after redirects is used when it keeps the dispatched
/// scheme and host. A redirect off the crawl's origin falls back to the
/// dispatched URL.
fn link_base(dispatched: &Url, final_url: &str) -> Url {
    match Url::parse(final_url) {
        Ok(served) if served.scheme() == dispatched.scheme() && same_host(&served, dispatched) => {
            served
        }
        Ok(served) => {
            tracing::debug!(
                "{} redirected off origin to {}, resolving links against the dispatched URL",
                dispatched,
                served
            );
            dispatched.clone()
        }
        Err(_) => dispatched.clone(),
    }
}
