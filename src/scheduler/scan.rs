use std::sync::Arc;

use scraper::Html;
use tracing::debug;
use url::Url;

use crate::app::Result;
use crate::domain::LinkCandidate;
use crate::extractor::parse_selector;

/// Collect the links matching `link_selector`, in document order.
///
/// Hrefs are resolved against `page_url`, so relative discussion links such
/// as `item?id=1` come out absolute.
pub fn scan_links(
    html: &str,
    page_url: &Url,
    link_selector: &str,
) -> Result<Vec<Arc<LinkCandidate>>> {
    let selector = parse_selector(link_selector)?;
    let document = Html::parse_document(html);

    let candidates: Vec<_> = document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| match page_url.join(href) {
            Ok(url) => Some(Arc::new(LinkCandidate::new(url.to_string()))),
            Err(e) => {
                debug!("Skipping unresolvable href {:?}: {}", href, e);
                None
            }
        })
        .collect();

    debug!("Scanned {} links with {:?}", candidates.len(), link_selector);
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><table>
        <tr><td><span class="titleline"><a href="https://example.com/one">One</a>
            <span class="sitebit"><a href="from?site=example.com">example.com</a></span></span></td></tr>
        <tr><td><span class="titleline"><a href="item?id=2">Ask HN: Two</a></span></td></tr>
        <tr><td><span class="titleline"><a href="https://example.org/three">Three</a></span></td></tr>
        <tr><td><a href="https://example.net/not-a-title">nav</a></td></tr>
    </table></body></html>"#;

    fn page_url() -> Url {
        Url::parse("https://news.ycombinator.com/").unwrap()
    }

    #[test]
    fn test_scan_in_document_order() {
        let links = scan_links(PAGE, &page_url(), ".titleline > a").unwrap();
        let hrefs: Vec<_> = links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec![
                "https://example.com/one",
                "https://news.ycombinator.com/item?id=2",
                "https://example.org/three",
            ]
        );
    }

    #[test]
    fn test_scanned_links_start_unclaimed() {
        let links = scan_links(PAGE, &page_url(), ".titleline > a").unwrap();
        assert!(links.iter().all(|l| !l.is_processed()));
    }

    #[test]
    fn test_anchor_without_href_skipped() {
        let html = r#"<span class="titleline"><a name="top">x</a></span>"#;
        let links = scan_links(html, &page_url(), ".titleline > a").unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_bad_selector() {
        assert!(scan_links(PAGE, &page_url(), "a[").is_err());
    }
}
