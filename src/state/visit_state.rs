/// Visit state definitions for URLs known to the frontier
use std::fmt;

/// Represents whether a URL has been dispatched to a worker
///
/// The only legal transition is `Unvisited -> Dispatched`, and it happens
/// exactly once per URL. A dispatched URL never becomes unvisited again,
/// even when its fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitState {
    /// Known but not yet handed to a worker
    Unvisited,

    /// Handed to a worker; its result may or may not have been reported
    Dispatched,
}

impl VisitState {
    /// Returns true once the URL has been handed to a worker
    pub fn is_visited(&self) -> bool {
        matches!(self, Self::Dispatched)
    }

    /// Returns true if moving from this state to `next` is allowed
    pub fn can_transition_to(&self, next: VisitState) -> bool {
        matches!((self, next), (Self::Unvisited, Self::Dispatched))
    }

    /// Short lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unvisited => "unvisited",
            Self::Dispatched => "dispatched",
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
