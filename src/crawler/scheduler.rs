//! Scheduler for handing out frontier URLs to the worker pool
//!
//! This module handles:
//! - Owning the frontier and the set of in-flight URLs
//! - Selecting unvisited URLs up to the worker capacity
//! - Merging worker reports back into the frontier
//! - Deciding when the crawl is finished
//!
//! The scheduler is plain data with no locking. It is owned by the
//! coordinator task, which is the only code that ever mutates it.

use crate::crawler::worker::PageReport;
use crate::output::CrawlStatistics;
use crate::state::{Frontier, VisitState};
use std::collections::HashSet;
use thiserror::Error;

/// Errors surfaced while scheduling or merging a report
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A report arrived for a URL that has no fetch in flight
    #[error("report for {url} does not match any fetch in flight")]
    NotInFlight { url: String },

    /// The dispatch queue was closed while work remained
    #[error("dispatch queue closed with {in_flight} fetches in flight")]
    DispatchClosed { in_flight: usize },
}

/// Scheduler manages the frontier and the dispatch bound
pub struct Scheduler {
    /// Every known URL and its visit state
    frontier: Frontier,

    /// URLs dispatched to a worker whose result has not been reported
    in_flight: HashSet<String>,

    /// Maximum number of URLs in flight at once
    capacity: usize,

    /// Running counters for the final report
    statistics: CrawlStatistics,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `seed` - Canonical seed URL, inserted as unvisited
    /// * `capacity` - Maximum number of concurrent fetches
    pub fn new(seed: impl Into<String>, capacity: usize) -> Self {
        Self {
            frontier: Frontier::with_seed(seed),
            in_flight: HashSet::with_capacity(capacity),
            capacity,
            statistics: CrawlStatistics::default(),
        }
    }

    /// Takes the next URL to dispatch, if capacity allows
    ///
    /// The URL is marked dispatched and counted as in flight before it is
    /// returned. Returns `None` when the frontier has no unvisited URL or
    /// the in-flight count has reached capacity.
    pub fn next_dispatch(&mut self) -> Option<String> {
        if self.in_flight.len() >= self.capacity {
            return None;
        }

        let url = self.frontier.next_unvisited()?;
        self.in_flight.insert(url.clone());

        self.statistics.dispatched += 1;
        self.statistics.peak_in_flight = self.statistics.peak_in_flight.max(self.in_flight.len());

        Some(url)
    }

    /// Merges a worker's report into the frontier
    ///
    /// Removes the reported URL from the in-flight set and inserts every
    /// discovered URL that is not already known as unvisited.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of newly discovered URLs
    /// * `Err(ScheduleError)` - The report does not match a fetch in flight;
    ///   nothing was changed
    pub fn record_report(&mut self, report: PageReport) -> Result<usize, ScheduleError> {
        if !self.in_flight.remove(&report.url) {
            return Err(ScheduleError::NotInFlight { url: report.url });
        }

        if report.succeeded {
            self.statistics.succeeded += 1;
        } else {
            self.statistics.failed += 1;
        }
        self.statistics.links_reported += report.links.len();

        let mut added = 0;
        for link in report.links {
            if self.frontier.insert(link) {
                added += 1;
            }
        }

        Ok(added)
    }

    /// Returns true when no URL is unvisited and nothing is in flight
    ///
    /// Both halves matter: an in-flight page may still discover new URLs
    /// after the frontier looks exhausted.
    pub fn is_finished(&self) -> bool {
        !self.frontier.has_unvisited() && self.in_flight.is_empty()
    }

    /// Number of URLs dispatched but not yet reported
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Maximum number of URLs in flight at once
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the frontier
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Returns the visit state of a URL, if known
    pub fn state(&self, url: &str) -> Option<VisitState> {
        self.frontier.state(url)
    }

    /// Returns a snapshot of the crawl counters
    pub fn statistics(&self) -> CrawlStatistics {
        CrawlStatistics {
            total_urls: self.frontier.len(),
            ..self.statistics.clone()
        }
    }

    /// Consumes the scheduler, returning the frontier
    pub fn into_frontier(self) -> Frontier {
        self.frontier
    }
}
