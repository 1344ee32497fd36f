use serde::{Deserialize, Serialize};

/// Terminal outcome for one link: a summary or a reason it is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryResult {
    Summary(String),
    Error(String),
}

impl SummaryResult {
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error(reason.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Text shown beneath the link.
    pub fn display_text(&self) -> String {
        match self {
            Self::Summary(text) => text.clone(),
            Self::Error(reason) => format!("Summary unavailable: {}", reason),
        }
    }
}

impl<E: std::fmt::Display> From<std::result::Result<String, E>> for SummaryResult {
    fn from(result: std::result::Result<String, E>) -> Self {
        match result {
            Ok(summary) => Self::Summary(summary),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_single_key() {
        let ok = serde_json::to_string(&SummaryResult::Summary("s".into())).unwrap();
        assert_eq!(ok, r#"{"summary":"s"}"#);

        let err = serde_json::to_string(&SummaryResult::error("boom")).unwrap();
        assert_eq!(err, r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_display_text_prefixes_errors() {
        assert_eq!(
            SummaryResult::error("timeout").display_text(),
            "Summary unavailable: timeout"
        );
        assert_eq!(
            SummaryResult::Summary("A short take.".into()).display_text(),
            "A short take."
        );
    }

    #[test]
    fn test_from_result() {
        let ok: SummaryResult = Ok::<_, String>("fine".to_string()).into();
        assert_eq!(ok, SummaryResult::Summary("fine".into()));

        let err: SummaryResult = Err::<String, _>("bad").into();
        assert!(err.is_error());
    }
}
