use serde::{Deserialize, Serialize};

/// Which wire protocol the summarization endpoint speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    /// OpenAI-style `/chat/completions` with a bearer token.
    #[default]
    ChatCompletions,
    /// Google `generateContent` with the key in the query string.
    Gemini,
}

/// Parameters every pipeline stage needs from the outside world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigBundle {
    pub endpoint_url: String,
    pub api_key: String,
    pub model_name: String,
    pub system_prompt: String,
    pub proxy_url_prefix: String,
    #[serde(default)]
    pub provider: Provider,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_reads_camel_case_keys() {
        let json = r#"{
            "endpointUrl": "https://api.example.com/v1/chat/completions",
            "apiKey": "sk-test",
            "modelName": "gpt-4o-mini",
            "systemPrompt": "Summarize.",
            "proxyUrlPrefix": "https://proxy.example.com/?url="
        }"#;

        let bundle: ConfigBundle = serde_json::from_str(json).unwrap();
        assert_eq!(bundle.endpoint_url, "https://api.example.com/v1/chat/completions");
        assert_eq!(bundle.api_key, "sk-test");
        assert_eq!(bundle.model_name, "gpt-4o-mini");
        assert_eq!(bundle.system_prompt, "Summarize.");
        assert_eq!(bundle.proxy_url_prefix, "https://proxy.example.com/?url=");
        assert_eq!(bundle.provider, Provider::ChatCompletions);
    }

    #[test]
    fn test_bundle_gemini_provider() {
        let json = r#"{
            "endpointUrl": "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent",
            "apiKey": "k",
            "modelName": "gemini-2.0-flash",
            "systemPrompt": "Summarize.",
            "proxyUrlPrefix": "p",
            "provider": "gemini"
        }"#;

        let bundle: ConfigBundle = serde_json::from_str(json).unwrap();
        assert_eq!(bundle.provider, Provider::Gemini);
    }

    #[test]
    fn test_bundle_missing_key_rejected() {
        let json = r#"{"endpointUrl": "x", "apiKey": "y"}"#;
        assert!(serde_json::from_str::<ConfigBundle>(json).is_err());
    }
}
