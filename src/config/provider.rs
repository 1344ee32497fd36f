//! One-shot loading of the provider config bundle.
//!
//! The bundle is absent until [`ConfigProvider::load`] succeeds. A failed
//! load is not retried; the provider simply stays absent and callers treat
//! that as a recoverable "not loaded" condition.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::app::{DigestError, Result};
use crate::domain::ConfigBundle;

/// Somewhere a config bundle can be read from.
#[async_trait]
pub trait BundleSource: Send + Sync {
    async fn fetch(&self) -> Result<ConfigBundle>;
}

/// Reads the bundle from a JSON file with camelCase keys.
pub struct FileBundleSource {
    path: PathBuf,
}

impl FileBundleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BundleSource for FileBundleSource {
    async fn fetch(&self) -> Result<ConfigBundle> {
        debug!("Reading config bundle from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Hands out a bundle that is already in memory.
pub struct StaticBundleSource(pub ConfigBundle);

#[async_trait]
impl BundleSource for StaticBundleSource {
    async fn fetch(&self) -> Result<ConfigBundle> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub struct ConfigProvider {
    cell: OnceCell<Arc<ConfigBundle>>,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the bundle once. Later calls return the stored bundle without
    /// touching the source again.
    pub async fn load(&self, source: &dyn BundleSource) -> Result<Arc<ConfigBundle>> {
        if let Some(bundle) = self.cell.get() {
            return Ok(bundle.clone());
        }

        match source.fetch().await {
            Ok(bundle) => {
                let bundle = self.cell.get_or_init(|| async { Arc::new(bundle) }).await;
                info!("Config bundle loaded (model {})", bundle.model_name);
                Ok(bundle.clone())
            }
            Err(e) => {
                error!("Failed to load config bundle: {}", e);
                Err(e)
            }
        }
    }

    /// The loaded bundle, or `None` while absent.
    pub fn get(&self) -> Option<Arc<ConfigBundle>> {
        self.cell.get().cloned()
    }

    /// Like [`get`](Self::get) but as an error for `?` callers.
    pub fn require(&self) -> Result<Arc<ConfigBundle>> {
        self.get().ok_or(DigestError::ConfigUnavailable)
    }
}
