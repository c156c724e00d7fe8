use crate::state::VisitState;
use std::collections::{HashMap, VecDeque};

/// Every URL known to a crawl, with its visit state
///
/// Keys are canonical URL strings and are never removed. Unvisited URLs are
/// handed out in discovery order (FIFO), and iteration yields URLs in the
/// order they were first inserted.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    /// Visit state of every known URL
    states: HashMap<String, VisitState>,

    /// All known URLs in discovery order
    order: Vec<String>,

    /// Unvisited URLs, oldest first
    pending: VecDeque<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding only the seed, unvisited
    pub fn with_seed(seed: impl Into<String>) -> Self {
        let mut frontier = Self::new();
        frontier.insert(seed);
        frontier
    }

    /// Inserts a URL as unvisited if it is not already known
    ///
    /// Returns true if the URL was new.
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.states.contains_key(&url) {
            return false;
        }

        self.states.insert(url.clone(), VisitState::Unvisited);
        self.order.push(url.clone());
        self.pending.push_back(url);
        true
    }

    /// Takes the oldest unvisited URL and marks it dispatched
    pub fn next_unvisited(&mut self) -> Option<String> {
        while let Some(url) = self.pending.pop_front() {
            let Some(state) = self.states.get_mut(&url) else {
                continue;
            };

            if !state.can_transition_to(VisitState::Dispatched) {
                continue;
            }

            *state = VisitState::Dispatched;
            return Some(url);
        }

        None
    }

    /// Returns true if at least one known URL is still unvisited
    pub fn has_unvisited(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of URLs not yet dispatched
    pub fn unvisited_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns the visit state of a URL, if known
    pub fn state(&self, url: &str) -> Option<VisitState> {
        self.states.get(url).copied()
    }

    /// Returns true if the URL is known
    pub fn contains(&self, url: &str) -> bool {
        self.states.contains_key(url)
    }

    /// Number of known URLs
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no URL is known
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over every known URL in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, VisitState)> + '_ {
        self.order
            .iter()
            .map(|url| (url.as_str(), self.states[url.as_str()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_seed() {
        let frontier = Frontier::with_seed("http://x.test/");
        assert_eq!(frontier.len(), 1);
        assert!(frontier.has_unvisited());
        assert_eq!(
            frontier.state("http://x.test/"),
            Some(VisitState::Unvisited)
        );
    }

    #[test]
    fn test_insert_deduplicates() {
        let mut frontier = Frontier::new();
        assert!(frontier.insert("http://x.test/a"));
        assert!(!frontier.insert("http://x.test/a"));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.unvisited_count(), 1);
    }

    #[test]
    fn test_insert_after_dispatch_is_ignored() {
        let mut frontier = Frontier::with_seed("http://x.test/");
        assert_eq!(frontier.next_unvisited().as_deref(), Some("http://x.test/"));

        assert!(!frontier.insert("http://x.test/"));
        assert!(!frontier.has_unvisited());
        assert_eq!(
            frontier.state("http://x.test/"),
            Some(VisitState::Dispatched)
        );
    }

    #[test]
    fn test_dispatch_in_discovery_order() {
        let mut frontier = Frontier::new();
        frontier.insert("http://x.test/c");
        frontier.insert("http://x.test/a");
        frontier.insert("http://x.test/b");

        assert_eq!(frontier.next_unvisited().as_deref(), Some("http://x.test/c"));
        assert_eq!(frontier.next_unvisited().as_deref(), Some("http://x.test/a"));
        assert_eq!(frontier.next_unvisited().as_deref(), Some("http://x.test/b"));
        assert_eq!(frontier.next_unvisited(), None);
    }

    #[test]
    fn test_each_url_dispatched_once() {
        let mut frontier = Frontier::new();
        for path in ["a", "b", "a", "c", "b"] {
            frontier.insert(format!("http://x.test/{}", path));
        }

        let mut dispatched = Vec::new();
        while let Some(url) = frontier.next_unvisited() {
            dispatched.push(url);
        }

        assert_eq!(dispatched.len(), 3);
        assert!(frontier.iter().all(|(_, state)| state.is_visited()));
    }

    #[test]
    fn test_iter_keeps_discovery_order() {
        let mut frontier = Frontier::with_seed("http://x.test/");
        frontier.insert("http://x.test/z");
        frontier.insert("http://x.test/m");
        frontier.next_unvisited();

        let urls: Vec<_> = frontier.iter().collect();
        assert_eq!(
            urls,
            vec![
                ("http://x.test/", VisitState::Dispatched),
                ("http://x.test/z", VisitState::Unvisited),
                ("http://x.test/m", VisitState::Unvisited),
            ]
        );
    }

    #[test]
    fn test_empty_frontier() {
        let mut frontier = Frontier::new();
        assert!(frontier.is_empty());
        assert!(!frontier.has_unvisited());
        assert_eq!(frontier.next_unvisited(), None);
        assert!(!frontier.contains("http://x.test/"));
    }
}
