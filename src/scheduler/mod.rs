//! Rate-limited batch scheduling of the summarization pipeline.
//!
//! ```text
//! Idle → Scanning → BatchInFlight → Cooldown → BatchInFlight … → Done
//! ```
//!
//! Members of a batch run concurrently on the scheduler's own task; the
//! next batch starts only after every member has been rendered.

mod policy;
mod scan;

pub use policy::{PacingConfig, RatePolicy, DEFAULT_BATCH_SIZE, DEFAULT_COOLDOWN_MS};
pub use scan::scan_links;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, error, info};
use url::Url;

use crate::app::{DigestError, Result};
use crate::backend::{BackendHandle, Request, Response};
use crate::domain::{LinkCandidate, SummaryResult};
use crate::extractor::Extractor;
use crate::render::Renderer;

pub const EXTRACTION_FAILED: &str = "Failed to fetch or extract content.";

/// Tally of one scheduler run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Candidates per batch, in the order the batches ran
    pub batches: Vec<usize>,
    pub cooldowns: usize,
    pub summarized: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunReport {
    fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            batches: Vec::new(),
            cooldowns: 0,
            summarized: 0,
            failed: 0,
            skipped: 0,
        }
    }
}

pub struct BatchScheduler {
    extractor: Arc<dyn Extractor>,
    backend: BackendHandle,
    renderer: Arc<dyn Renderer>,
    policy: RatePolicy,
    discussion_prefix: String,
}

impl BatchScheduler {
    pub fn new(
        extractor: Arc<dyn Extractor>,
        backend: BackendHandle,
        renderer: Arc<dyn Renderer>,
        policy: RatePolicy,
        discussion_prefix: impl Into<String>,
    ) -> Self {
        Self {
            extractor,
            backend,
            renderer,
            policy,
            discussion_prefix: discussion_prefix.into(),
        }
    }

    /// Scan `html` for links and run every one of them through the pipeline.
    ///
    /// The config is checked before the page is scanned.
    pub async fn run_page(
        &self,
        html: &str,
        page_url: &Url,
        link_selector: &str,
    ) -> Result<(Vec<Arc<LinkCandidate>>, RunReport)> {
        let proxy_prefix = self.proxy_prefix().await?;

        debug!("Scanning {}", page_url);
        let candidates = scan_links(html, page_url, link_selector)?;
        let report = self.run_batches(&candidates, &proxy_prefix).await;
        Ok((candidates, report))
    }

    /// Process `candidates` in batches with a cooldown between them.
    ///
    /// Fails only when the backend has no config; per-link failures are
    /// rendered and counted.
    pub async fn run(&self, candidates: &[Arc<LinkCandidate>]) -> Result<RunReport> {
        let proxy_prefix = self.proxy_prefix().await?;
        Ok(self.run_batches(candidates, &proxy_prefix).await)
    }

    async fn proxy_prefix(&self) -> Result<String> {
        match self.backend.request(Request::RequestConfig).await {
            Response::Config(bundle) => Ok(bundle.proxy_url_prefix),
            Response::Error(e) => {
                error!("Failed to get config from backend: {}", e);
                Err(DigestError::ConfigUnavailable)
            }
            Response::Summary(_) => {
                error!("Backend answered a config request with a summary");
                Err(DigestError::ConfigUnavailable)
            }
        }
    }

    async fn run_batches(
        &self,
        candidates: &[Arc<LinkCandidate>],
        proxy_prefix: &str,
    ) -> RunReport {
        let mut report = RunReport::new();
        let batch_count = candidates.len().div_ceil(self.policy.batch_size());

        for (index, batch) in candidates.chunks(self.policy.batch_size()).enumerate() {
            debug!("Batch {}/{} in flight", index + 1, batch_count);
            report.batches.push(batch.len());

            let mut pending = Vec::new();
            for candidate in batch {
                // Discussion links are left unclaimed
                if !candidate.is_eligible(&self.discussion_prefix) || !candidate.try_claim() {
                    report.skipped += 1;
                    continue;
                }
                pending.push(self.process(candidate, proxy_prefix));
            }

            for result in join_all(pending).await {
                if result.is_error() {
                    report.failed += 1;
                } else {
                    report.summarized += 1;
                }
            }

            if index + 1 < batch_count {
                debug!("Cooling down for {:?}", self.policy.cooldown());
                report.cooldowns += 1;
                tokio::time::sleep(self.policy.cooldown()).await;
            }
        }

        report.finished_at = Some(Utc::now());
        info!(
            "Run complete: {} summarized, {} failed, {} skipped in {} batches",
            report.summarized,
            report.failed,
            report.skipped,
            report.batches.len()
        );
        report
    }

    async fn process(&self, candidate: &LinkCandidate, proxy_prefix: &str) -> SummaryResult {
        let result = match self.extractor.extract(&candidate.href, proxy_prefix).await {
            Some(text) => self
                .backend
                .request(Request::Summarize { text })
                .await
                .into_summary_result(),
            None => SummaryResult::error(EXTRACTION_FAILED),
        };

        self.renderer.render(candidate, &result);
        result
    }
}
