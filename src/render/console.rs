use crate::domain::{LinkCandidate, SummaryResult};
use crate::render::Renderer;

/// Prints `href` followed by the indented summary or failure reason.
#[derive(Debug, Default)]
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    pub fn format(candidate: &LinkCandidate, result: &SummaryResult) -> String {
        let body = result
            .display_text()
            .lines()
            .map(|line| format!("    {}", line))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n{}\n", candidate.href, body)
    }
}

impl Renderer for ConsoleRenderer {
    fn render(&self, candidate: &LinkCandidate, result: &SummaryResult) {
        println!("{}", Self::format(candidate, result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_summary() {
        let link = LinkCandidate::new("https://example.com/a");
        let out = ConsoleRenderer::format(&link, &SummaryResult::Summary("One.\nTwo.".into()));
        assert_eq!(out, "https://example.com/a\n    One.\n    Two.\n");
    }

    #[test]
    fn test_format_error() {
        let link = LinkCandidate::new("https://example.com/a");
        let out = ConsoleRenderer::format(&link, &SummaryResult::error("timeout"));
        assert_eq!(out, "https://example.com/a\n    Summary unavailable: timeout\n");
    }
}
