//! Messages crossing the boundary between the page-side scheduler and the
//! backend orchestrator.
//!
//! ```text
//! {"requestConfig": true}  →  {"config": {...}}  | {"error": "..."}
//! {"text": "..."}          →  {"summary": "..."} | {"error": "..."}
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{ConfigBundle, SummaryResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireRequest", into = "WireRequest")]
pub enum Request {
    RequestConfig,
    Summarize { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Config(ConfigBundle),
    Summary(String),
    Error(String),
}

impl Response {
    /// Collapse a reply to a summarize request into a per-link result.
    pub fn into_summary_result(self) -> SummaryResult {
        match self {
            Self::Summary(s) => SummaryResult::Summary(s),
            Self::Error(e) => SummaryResult::Error(e),
            Self::Config(_) => SummaryResult::error("unexpected reply from summarization backend"),
        }
    }
}

impl From<SummaryResult> for Response {
    fn from(result: SummaryResult) -> Self {
        match result {
            SummaryResult::Summary(s) => Self::Summary(s),
            SummaryResult::Error(e) => Self::Error(e),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    request_config: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl TryFrom<WireRequest> for Request {
    type Error = String;

    fn try_from(wire: WireRequest) -> Result<Self, Self::Error> {
        if wire.request_config {
            return Ok(Self::RequestConfig);
        }
        match wire.text {
            Some(text) => Ok(Self::Summarize { text }),
            None => Err("message carries neither requestConfig nor text".to_string()),
        }
    }
}

impl From<Request> for WireRequest {
    fn from(request: Request) -> Self {
        match request {
            Request::RequestConfig => Self {
                request_config: true,
                text: None,
            },
            Request::Summarize { text } => Self {
                request_config: false,
                text: Some(text),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_config_wire_shape() {
        let value = serde_json::to_value(Request::RequestConfig).unwrap();
        assert_eq!(value, json!({"requestConfig": true}));

        let parsed: Request = serde_json::from_value(json!({"requestConfig": true})).unwrap();
        assert_eq!(parsed, Request::RequestConfig);
    }

    #[test]
    fn test_summarize_wire_shape() {
        let value = serde_json::to_value(Request::Summarize {
            text: "body".into(),
        })
        .unwrap();
        assert_eq!(value, json!({"text": "body"}));
    }

    #[test]
    fn test_request_config_wins_over_text() {
        let parsed: Request =
            serde_json::from_value(json!({"requestConfig": true, "text": "x"})).unwrap();
        assert_eq!(parsed, Request::RequestConfig);
    }

    #[test]
    fn test_empty_message_rejected() {
        assert!(serde_json::from_value::<Request>(json!({})).is_err());
        assert!(serde_json::from_value::<Request>(json!({"requestConfig": false})).is_err());
    }

    #[test]
    fn test_response_wire_shapes() {
        assert_eq!(
            serde_json::to_value(Response::Summary("s".into())).unwrap(),
            json!({"summary": "s"})
        );
        assert_eq!(
            serde_json::to_value(Response::Error("configuration not loaded".into())).unwrap(),
            json!({"error": "configuration not loaded"})
        );

        let config: Response = serde_json::from_value(json!({"config": {
            "endpointUrl": "e", "apiKey": "k", "modelName": "m",
            "systemPrompt": "p", "proxyUrlPrefix": "x"
        }}))
        .unwrap();
        assert!(matches!(config, Response::Config(b) if b.proxy_url_prefix == "x"));
    }

    #[test]
    fn test_into_summary_result() {
        assert_eq!(
            Response::Summary("ok".into()).into_summary_result(),
            SummaryResult::Summary("ok".into())
        );
        assert!(Response::Error("bad".into())
            .into_summary_result()
            .is_error());
    }
}
