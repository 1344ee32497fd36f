use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{endpoint_url, read_json, SummarizeError, SummarizerConfig};
use crate::domain::ConfigBundle;

pub(super) async fn summarize(
    client: &Client,
    config: &SummarizerConfig,
    text: &str,
    bundle: &ConfigBundle,
) -> Result<String, SummarizeError> {
    // No system role here; the instruction leads the prompt
    let prompt = format!("{}\n\n{}", bundle.system_prompt, text);

    let body = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part { text: &prompt }],
        }],
        generation_config: GenerationConfig {
            temperature: config.temperature,
            max_output_tokens: config.max_tokens,
        },
    };

    let mut endpoint = endpoint_url(bundle)?;
    endpoint
        .query_pairs_mut()
        .append_pair("key", bundle.api_key.trim());

    let response = client
        .post(endpoint)
        .json(&body)
        .send()
        .await;

    let parsed: GenerateResponse = read_json(response).await?;
    parsed
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .and_then(|c| c.parts)
        .and_then(|p| p.into_iter().next())
        .and_then(|p| p.text)
        .map(|text| text.trim().to_string())
        .ok_or(SummarizeError::UnexpectedResponseShape)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
