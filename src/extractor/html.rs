use scraper::{Html, Selector};

use crate::app::{DigestError, Result};
use crate::extractor::ExtractorConfig;

/// Reduces an HTML document to a bounded plain-text excerpt.
pub struct ContentExtractor {
    content_selectors: Vec<Selector>,
    paragraph: Selector,
    max_chars: usize,
}

impl ContentExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let content_selectors = config
            .content_selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            content_selectors,
            paragraph: parse_selector("p")?,
            max_chars: config.max_chars,
        })
    }

    /// Extract readable text from a document.
    ///
    /// The first element matching a content selector wins and contributes its
    /// full text content. Without a match, every paragraph's text is joined,
    /// each followed by a space. The result is cut at `max_chars` characters.
    pub fn extract(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        let region = self
            .content_selectors
            .iter()
            .find_map(|selector| document.select(selector).next());

        let text = match region {
            Some(element) => element.text().collect::<String>(),
            None => document
                .select(&self.paragraph)
                .map(|p| {
                    let mut text = p.text().collect::<String>();
                    text.push(' ');
                    text
                })
                .collect(),
        };

        truncate_chars(&text, self.max_chars).to_string()
    }
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| DigestError::Selector(format!("{}: {}", selector, e)))
}

/// Hard cut at `max_chars` characters, not word-aware.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
