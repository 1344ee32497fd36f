use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for article text extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Hard cap on extracted characters (default: 8000)
    pub max_chars: usize,

    /// Proxy fetch timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// CSS selectors for the main content region, in priority order
    pub content_selectors: Vec<String>,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_chars: 8000,
            timeout_secs: 30,
            content_selectors: vec![
                "article".to_string(),
                "main".to_string(),
                ".article-content".to_string(),
                "#content".to_string(),
            ],
            user_agent: Some(concat!("hn-digest/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl ExtractorConfig {
    /// Get the fetch timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
