use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Mutex;

use lol_html::html_content::ContentType;
use lol_html::{ElementContentHandlers, HtmlRewriter, Selector, Settings};
use url::Url;

use crate::app::{DigestError, Result};
use crate::domain::{LinkCandidate, SummaryResult};
use crate::render::Renderer;

pub const SUMMARY_CLASS: &str = "hn-digest-summary";

/// Collects results, then splices them into the listing page.
///
/// Each processed link gets one `<div>` inserted right after it carrying the
/// summary or the failure reason.
pub struct PageRenderer {
    page_url: Url,
    link_selector: String,
    results: Mutex<HashMap<String, SummaryResult>>,
}

impl PageRenderer {
    pub fn new(page_url: Url, link_selector: impl Into<String>) -> Self {
        Self {
            page_url,
            link_selector: link_selector.into(),
            results: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.results().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn results(&self) -> std::sync::MutexGuard<'_, HashMap<String, SummaryResult>> {
        self.results.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Rewrite `html`, inserting a summary node after every link that has a result.
    pub fn rewrite(&self, html: &str) -> Result<String> {
        let selector: Selector = self
            .link_selector
            .parse()
            .map_err(|e| DigestError::Selector(format!("{}: {}", self.link_selector, e)))?;
        let results = self.results().clone();
        let page_url = &self.page_url;

        let handler = ElementContentHandlers::default().element(move |el| {
            let node = el
                .get_attribute("href")
                .and_then(|href| {
                    // Raw attribute text; candidates carry the entity-decoded href
                    let href = html_escape::decode_html_entities(&href);
                    page_url.join(&href).ok()
                })
                .and_then(|url| results.get(url.as_str()))
                .map(summary_node);

            if let Some(node) = node {
                el.after(&node, ContentType::Html);
            }
            Ok(())
        });

        let mut output = Vec::with_capacity(html.len());
        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![(Cow::Owned(selector), handler)],
                ..Settings::default()
            },
            |chunk: &[u8]| output.extend_from_slice(chunk),
        );

        rewriter
            .write(html.as_bytes())
            .map_err(|e| DigestError::Render(e.to_string()))?;
        rewriter
            .end()
            .map_err(|e| DigestError::Render(e.to_string()))?;

        String::from_utf8(output).map_err(|e| DigestError::Render(e.to_string()))
    }
}

fn summary_node(result: &SummaryResult) -> String {
    format!(
        r#"<div class="{}">{}</div>"#,
        SUMMARY_CLASS,
        html_escape::encode_text(&result.display_text())
    )
}

impl Renderer for PageRenderer {
    fn render(&self, candidate: &LinkCandidate, result: &SummaryResult) {
        self.results()
            .insert(candidate.href.clone(), result.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><span class="titleline"><a href="https://example.com/a">A</a></span><span class="titleline"><a href="item?id=1">Ask</a></span><span class="titleline"><a href="https://example.com/b">B</a></span></body></html>"#;

    fn renderer() -> PageRenderer {
        PageRenderer::new(
            Url::parse("https://news.ycombinator.com/").unwrap(),
            ".titleline > a",
        )
    }

    #[test]
    fn test_inserts_after_link() {
        let r = renderer();
        r.render(
            &LinkCandidate::new("https://example.com/a"),
            &SummaryResult::Summary("Short take.".into()),
        );

        let out = r.rewrite(PAGE).unwrap();
        assert!(out.contains(
            r#"<a href="https://example.com/a">A</a><div class="hn-digest-summary">Short take.</div></span>"#
        ));
        assert_eq!(out.matches(SUMMARY_CLASS).count(), 1);
    }

    #[test]
    fn test_error_text_is_prefixed_and_escaped() {
        let r = renderer();
        r.render(
            &LinkCandidate::new("https://example.com/b"),
            &SummaryResult::error("<script>bad</script>"),
        );

        let out = r.rewrite(PAGE).unwrap();
        assert!(out.contains("Summary unavailable: &lt;script&gt;bad&lt;/script&gt;"));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn test_untouched_without_results() {
        let r = renderer();
        assert!(r.is_empty());
        assert_eq!(r.rewrite(PAGE).unwrap(), PAGE);
    }

    #[test]
    fn test_relative_href_matches_resolved_candidate() {
        let r = renderer();
        r.render(
            &LinkCandidate::new("https://news.ycombinator.com/item?id=1"),
            &SummaryResult::Summary("thread".into()),
        );
        let out = r.rewrite(PAGE).unwrap();
        assert!(out.contains(r#"Ask</a><div class="hn-digest-summary">thread</div>"#));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn test_entity_encoded_href_gets_its_summary() {
        use crate::scheduler::scan_links;

        let page = r#"<span class="titleline"><a href="https://example.com/post?a=1&amp;b=2">P</a></span>"#;
        let page_url = Url::parse("https://news.ycombinator.com/").unwrap();
        let links = scan_links(page, &page_url, ".titleline > a").unwrap();
        assert_eq!(links[0].href, "https://example.com/post?a=1&b=2");

        let r = renderer();
        r.render(&links[0], &SummaryResult::Summary("S".into()));

        let out = r.rewrite(page).unwrap();
        assert_eq!(out.matches(SUMMARY_CLASS).count(), 1);
        assert!(out.contains(r#"P</a><div class="hn-digest-summary">S</div>"#));
    }
}
