use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{endpoint_url, read_json, SummarizeError, SummarizerConfig};
use crate::domain::ConfigBundle;

pub(super) async fn summarize(
    client: &Client,
    config: &SummarizerConfig,
    text: &str,
    bundle: &ConfigBundle,
) -> Result<String, SummarizeError> {
    let endpoint = endpoint_url(bundle)?;

    let mut headers = HeaderMap::new();
    let auth = format!("Bearer {}", bundle.api_key.trim());
    match HeaderValue::from_str(&auth) {
        Ok(value) => {
            headers.insert(AUTHORIZATION, value);
        }
        Err(e) => warn!("apiKey is not a valid header value, sending without auth: {}", e),
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let body = ChatRequest {
        model: &bundle.model_name,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &bundle.system_prompt,
            },
            ChatMessage {
                role: "user",
                content: text,
            },
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };

    let response = client
        .post(endpoint)
        .headers(headers)
        .json(&body)
        .send()
        .await;

    let parsed: ChatResponse = read_json(response).await?;
    parsed
        .choices
        .and_then(|choices| choices.into_iter().next())
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .ok_or(SummarizeError::UnexpectedResponseShape)
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}
