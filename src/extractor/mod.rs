//! Article text extraction through a fetch proxy.
//!
//! # Architecture
//!
//! ```text
//! target URL → proxy prefix + percent-encoded URL → GET → HTML → content region → capped text
//! ```
//!
//! Every failure (bad status, transport error, empty document) collapses to
//! `None`; nothing propagates to the caller.

mod config;
mod html;

pub use config::ExtractorConfig;
pub use html::{truncate_chars, ContentExtractor};

pub(crate) use html::parse_selector;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::app::Result;

/// Build the proxied fetch address for `target_url`.
pub fn proxied_url(proxy_prefix: &str, target_url: &str) -> String {
    format!("{}{}", proxy_prefix, urlencoding::encode(target_url))
}

/// Trait for article text extraction implementations
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Fetch `target_url` through `proxy_prefix` and reduce it to plain text.
    ///
    /// Returns `None` on any fetch or parse failure, or when the page has no
    /// extractable text.
    async fn extract(&self, target_url: &str, proxy_prefix: &str) -> Option<String>;
}

/// reqwest-based extractor
pub struct HttpExtractor {
    client: Client,
    content: ContentExtractor,
}

impl HttpExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true);

        if let Some(ref ua) = config.user_agent {
            builder = builder.user_agent(ua.clone());
        }

        Ok(Self {
            client: builder.build()?,
            content: ContentExtractor::new(config)?,
        })
    }

    async fn fetch_html(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Proxy fetch error for {}: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Proxy fetch error: {}", status);
            match response.text().await {
                Ok(body) => warn!("Proxy error response body: {}", body),
                Err(e) => warn!("Error reading proxy response body: {}", e),
            }
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("Failed to read proxy response from {}: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl Extractor for HttpExtractor {
    async fn extract(&self, target_url: &str, proxy_prefix: &str) -> Option<String> {
        let url = proxied_url(proxy_prefix, target_url);
        let html = self.fetch_html(&url).await?;

        let text = self.content.extract(&html);
        if text.trim().is_empty() {
            debug!("No extractable text in {}", target_url);
            return None;
        }

        debug!("Extracted {} chars from {}", text.chars().count(), target_url);
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxied_url_encodes_target() {
        let url = proxied_url(
            "https://proxy.example.com/?url=",
            "https://example.com/a b?x=1&y=2",
        );
        assert_eq!(
            url,
            "https://proxy.example.com/?url=https%3A%2F%2Fexample.com%2Fa%20b%3Fx%3D1%26y%3D2"
        );
    }

    #[test]
    fn test_proxied_url_empty_prefix() {
        assert_eq!(proxied_url("", "a/b"), "a%2Fb");
    }

    #[tokio::test]
    async fn test_unreachable_proxy_is_none() {
        let extractor = HttpExtractor::new(&ExtractorConfig {
            timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();

        // Nothing listens on the discard port
        let text = extractor
            .extract("https://example.com/", "http://127.0.0.1:9/?url=")
            .await;
        assert!(text.is_none());
    }
}
