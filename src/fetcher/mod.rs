pub mod http_fetcher;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::app::Result;

/// Where the listing page HTML comes from
#[derive(Debug, Clone)]
pub enum PageSource {
    /// Fetch over HTTP
    Url(String),
    /// Read a saved copy from disk
    File(PathBuf),
}

#[async_trait]
pub trait Fetcher {
    /// Fetch the document at `url` as text. Non-success statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Load the listing page from `source`.
pub async fn load_page(
    fetcher: &(dyn Fetcher + Send + Sync),
    source: &PageSource,
) -> Result<String> {
    match source {
        PageSource::Url(url) => fetcher.fetch(url).await,
        PageSource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DigestError;

    struct NoNetwork;

    #[async_trait]
    impl Fetcher for NoNetwork {
        async fn fetch(&self, url: &str) -> Result<String> {
            Err(DigestError::Other(format!("unexpected fetch of {}", url)))
        }
    }

    #[tokio::test]
    async fn test_load_page_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.html");
        std::fs::write(&path, "<html></html>").unwrap();

        let html = load_page(&NoNetwork, &PageSource::File(path)).await.unwrap();
        assert_eq!(html, "<html></html>");
    }

    #[tokio::test]
    async fn test_load_page_from_url_uses_fetcher() {
        let source = PageSource::Url("https://example.com".into());
        let result = load_page(&NoNetwork, &source).await;
        assert!(matches!(result, Err(DigestError::Other(_))));
    }
}
