//! Ollama provider — local `/api/chat`, non-streaming.
//!
//! Ollama answers `{"message": {"role": "assistant", "content": "..."}}`,
//! which is already one of the shapes `AiResponse` understands.

use super::{error_body, AiCapability, AiResponse, ProviderError};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Upper bound on one reachability check, so an unroutable host can't
/// stall the readiness loop.
pub const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

pub struct OllamaCapability {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaCapability {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// True if the Ollama server answers `GET /api/tags`.
    pub async fn is_reachable(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let request = self.client.get(&url).timeout(REACHABILITY_TIMEOUT);
        match request.send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                log::debug!("[LLM] Ollama not reachable at {}: {}", self.base_url, e);
                false
            }
        }
    }
}

#[async_trait]
impl AiCapability for OllamaCapability {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn chat(&self, prompt: &str) -> Result<AiResponse, ProviderError> {
        let start = std::time::Instant::now();
        log::info!("[LLM] Provider: ollama, model: {}", self.model);

        let request = OllamaRequest {
            model: &self.model,
            messages: vec![OllamaMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let url = format!("{}/api/chat", self.base_url);
        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(error_body(response).await);
        }

        let body: AiResponse = response.json().await?;
        log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());
        Ok(body)
    }
}
