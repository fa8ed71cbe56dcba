//! Google Gemini provider — `generateContent`, non-streaming.
//!
//! Differences from Anthropic:
//! - API key in the `x-goog-api-key` header
//! - Text in `candidates[0].content.parts[].text`

use super::prompts::{GEMINI_MODEL, MAX_TOKENS};
use super::{error_body, AiCapability, AiResponse, ProviderError};
use async_trait::async_trait;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiCapability {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiCapability {
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| GEMINI_MODEL.to_string()),
        }
    }

    /// Build from `GEMINI_API_KEY`. Fails if the key is unset or empty.
    pub fn from_env(model: Option<String>) -> Result<Self, ProviderError> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => Ok(Self::new(key, model)),
            _ => Err(ProviderError::MissingApiKey("gemini")),
        }
    }

    fn request(&self, prompt: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}/{}:generateContent", API_BASE, self.model))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": prompt}]}],
                "generationConfig": {"maxOutputTokens": MAX_TOKENS, "temperature": 0.1}
            }))
    }
}

#[async_trait]
impl AiCapability for GeminiCapability {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn chat(&self, prompt: &str) -> Result<AiResponse, ProviderError> {
        let start = std::time::Instant::now();
        log::info!("[LLM] Provider: gemini, model: {}", self.model);

        let response = self.request(prompt).send().await?;

        if !response.status().is_success() {
            return Err(error_body(response).await);
        }

        let body: serde_json::Value = response.json().await?;
        log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());

        candidate_parts(&body)
            .map(AiResponse::from_fragments)
            .ok_or_else(|| ProviderError::Decode("no candidates in response".to_string()))
    }
}

/// Text of every part of the first candidate.
fn candidate_parts(body: &serde_json::Value) -> Option<Vec<String>> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    Some(
        parts
            .iter()
            .filter_map(|p| p["text"].as_str())
            .map(str::to_string)
            .collect(),
    )
}
