//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitState`: Whether a known URL has been handed to a worker yet
//! - `Frontier`: Every URL known to the crawl, keyed by canonical form

mod frontier;
mod visit_state;

// Re-export main types
pub use frontier::Frontier;
pub use visit_state::VisitState;
