//! Summarization client for remote language-model APIs.
//!
//! One request per article. The wire protocol is picked per bundle through
//! [`Provider`](crate::domain::Provider):
//!
//! - [`chat`]: `/chat/completions` style, bearer token auth
//! - [`gemini`]: `generateContent` style, key in the query string

pub mod chat;
pub mod gemini;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use url::Url;

use crate::app::Result;
use crate::domain::{ConfigBundle, Provider};

/// Why a summary could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizeError {
    /// The backend answered with a non-success status.
    #[error("API error: {status}{}", message_suffix(.message))]
    UpstreamApi {
        status: u16,
        message: Option<String>,
    },

    /// Success status, but the payload lacks the expected fields.
    #[error("Unexpected response format from summarization API")]
    UnexpectedResponseShape,

    /// Transport failure; the detail is logged, not shown.
    #[error("Network error while contacting summarization API")]
    Network(String),

    /// `endpointUrl` in the bundle is not a valid URL.
    #[error("Invalid summarization endpoint: {0}")]
    InvalidEndpoint(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" - {}", m))
        .unwrap_or_default()
}

/// Generation parameters, fixed per process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Sampling temperature (default: 0.5)
    pub temperature: f32,

    /// Output cap in tokens (default: 150)
    pub max_tokens: u32,

    /// Request timeout in seconds (default: 60)
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            max_tokens: 150,
            timeout_secs: 60,
        }
    }
}

impl SummarizerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Trait for summarization backends
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        bundle: &ConfigBundle,
    ) -> std::result::Result<String, SummarizeError>;
}

/// reqwest-based client covering every [`Provider`].
pub struct SummarizationClient {
    client: Client,
    config: SummarizerConfig,
}

impl SummarizationClient {
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Summarizer for SummarizationClient {
    async fn summarize(
        &self,
        text: &str,
        bundle: &ConfigBundle,
    ) -> std::result::Result<String, SummarizeError> {
        let result = match bundle.provider {
            Provider::ChatCompletions => {
                chat::summarize(&self.client, &self.config, text, bundle).await
            }
            Provider::Gemini => {
                gemini::summarize(&self.client, &self.config, text, bundle).await
            }
        };

        if let Err(ref e) = result {
            match e {
                SummarizeError::Network(detail) => error!("Summarization error: {}", detail),
                other => warn!("Summarization failed: {}", other),
            }
        }

        result
    }
}

/// Parse the bundle's endpoint before any request is built.
fn endpoint_url(bundle: &ConfigBundle) -> std::result::Result<Url, SummarizeError> {
    Url::parse(&bundle.endpoint_url).map_err(|e| {
        error!("Invalid endpointUrl {:?}: {}", bundle.endpoint_url, e);
        SummarizeError::InvalidEndpoint(bundle.endpoint_url.clone())
    })
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Map a sent request's response to a typed body or a classified error.
async fn read_json<T: DeserializeOwned>(
    response: std::result::Result<Response, reqwest::Error>,
) -> std::result::Result<T, SummarizeError> {
    let response = response.map_err(|e| SummarizeError::Network(e.to_string()))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| SummarizeError::Network(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .and_then(|d| d.message);
        return Err(SummarizeError::UpstreamApi {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|_| SummarizeError::UnexpectedResponseShape)
}
