use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{DigestError, Result};
use crate::backend::{spawn_backend, BackendHandle, Request, Response};
use crate::config::{BundleSource, FileBundleSource, Settings};
use crate::domain::ConfigBundle;
use crate::extractor::{Extractor, HttpExtractor};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::render::Renderer;
use crate::scheduler::{BatchScheduler, RatePolicy};
use crate::summarizer::SummarizationClient;

/// Wires settings to the pipeline components.
///
/// Building a context spawns the backend task, so it must happen inside a
/// tokio runtime.
pub struct AppContext {
    pub settings: Settings,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub extractor: Arc<dyn Extractor>,
    pub backend: BackendHandle,
}

impl AppContext {
    pub fn new(settings: Settings, bundle_path: PathBuf) -> Result<Self> {
        Self::with_source(settings, Arc::new(FileBundleSource::new(bundle_path)))
    }

    pub fn with_source(settings: Settings, source: Arc<dyn BundleSource>) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new()?);
        let extractor: Arc<dyn Extractor> = Arc::new(HttpExtractor::new(&settings.extractor)?);
        let summarizer = Arc::new(SummarizationClient::new(settings.summarizer.clone())?);
        let backend = spawn_backend(source, summarizer);

        Ok(Self {
            settings,
            fetcher,
            extractor,
            backend,
        })
    }

    /// Ask the backend for the loaded bundle.
    pub async fn bundle(&self) -> Result<ConfigBundle> {
        match self.backend.request(Request::RequestConfig).await {
            Response::Config(bundle) => Ok(bundle),
            Response::Error(e) => {
                tracing::error!("Failed to get config from backend: {}", e);
                Err(DigestError::ConfigUnavailable)
            }
            Response::Summary(_) => Err(DigestError::ConfigUnavailable),
        }
    }

    pub fn scheduler(&self, renderer: Arc<dyn Renderer>, policy: RatePolicy) -> BatchScheduler {
        BatchScheduler::new(
            self.extractor.clone(),
            self.backend.clone(),
            renderer,
            policy,
            self.settings.page.discussion_prefix.clone(),
        )
    }
}
