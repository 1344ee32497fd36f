use std::sync::atomic::{AtomicBool, Ordering};

/// A hyperlink discovered on the listing page.
///
/// `processed` flips to true the moment a scheduler claims the link, before any
/// network work starts, so overlapping runs over the same candidates never
/// summarize a link twice.
#[derive(Debug)]
pub struct LinkCandidate {
    pub href: String,
    processed: AtomicBool,
}

impl LinkCandidate {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            processed: AtomicBool::new(false),
        }
    }

    /// Claim the link for processing.
    ///
    /// Returns true only for the first caller; check and set happen in one
    /// atomic step.
    pub fn try_claim(&self) -> bool {
        !self.processed.swap(true, Ordering::AcqRel)
    }

    pub fn is_processed(&self) -> bool {
        self.processed.load(Ordering::Acquire)
    }

    /// Whether the link can be fetched directly and is not one of the
    /// aggregator's own discussion pages.
    pub fn is_eligible(&self, discussion_prefix: &str) -> bool {
        self.href.starts_with("http") && !self.href.starts_with(discussion_prefix)
    }
}
