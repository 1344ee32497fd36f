//! Presenting per-link results.
//!
//! - [`ConsoleRenderer`]: prints each result as it settles
//! - [`PageRenderer`]: collects results and rewrites the listing page

mod console;
mod page;

pub use console::ConsoleRenderer;
pub use page::{PageRenderer, SUMMARY_CLASS};

use crate::domain::{LinkCandidate, SummaryResult};

/// Receives each link's terminal result, exactly once per processed link.
pub trait Renderer: Send + Sync {
    fn render(&self, candidate: &LinkCandidate, result: &SummaryResult);
}
