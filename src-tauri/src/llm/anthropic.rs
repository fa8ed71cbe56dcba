//! Anthropic Claude provider — Messages API, non-streaming.
//!
//! The reply's `content` blocks become message fragments, so a multi-block
//! answer is joined line by line like any other fragment list.

use super::prompts::{ANTHROPIC_MODEL, MAX_TOKENS};
use super::{error_body, AiCapability, AiResponse, ProviderError};
use async_trait::async_trait;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

pub struct AnthropicCapability {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl AnthropicCapability {
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| ANTHROPIC_MODEL.to_string()),
        }
    }

    /// Build from `ANTHROPIC_API_KEY`. Fails if the key is unset or empty.
    pub fn from_env(model: Option<String>) -> Result<Self, ProviderError> {
        match std::env::var("ANTHROPIC_API_KEY") {
            Ok(key) if !key.is_empty() => Ok(Self::new(key, model)),
            _ => Err(ProviderError::MissingApiKey("anthropic")),
        }
    }
}

#[async_trait]
impl AiCapability for AnthropicCapability {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn chat(&self, prompt: &str) -> Result<AiResponse, ProviderError> {
        let start = std::time::Instant::now();
        log::info!("[LLM] Provider: anthropic, model: {}", self.model);

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": MAX_TOKENS,
                "messages": [{"role": "user", "content": prompt}]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_body(response).await);
        }

        let body: serde_json::Value = response.json().await?;
        log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());

        text_blocks(&body)
            .map(AiResponse::from_fragments)
            .ok_or_else(|| ProviderError::Decode("no content array in response".to_string()))
    }
}

/// Collect the `text` of every text block in a Messages API response.
fn text_blocks(body: &serde_json::Value) -> Option<Vec<String>> {
    let content = body.get("content")?.as_array()?;
    Some(
        content
            .iter()
            .filter(|block| block.get("type").and_then(|t| t.as_str()) == Some("text"))
            .filter_map(|block| block.get("text").and_then(|t| t.as_str()))
            .map(str::to_string)
            .collect(),
    )
}
