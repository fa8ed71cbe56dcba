//! LLM domain — the AI capability behind every conversion.
//!
//! Public API for the provider layer. The converter only sees the
//! `AiCapability` trait; concrete providers live in their own files.
//!
//! Providers:
//!   - Anthropic Claude (anthropic.rs)
//!   - Google Gemini (gemini.rs)
//!   - Ollama, local (ollama.rs)
//!
//! Shared:
//!   - types.rs    — AiResponse and its normalization
//!   - prompts.rs  — CONVERT prompt + model constants
//!   - provider.rs — provider metadata, resolution, readiness probe

mod anthropic;
mod gemini;
mod ollama;
pub mod prompts;
pub mod provider;
pub mod types;

pub use anthropic::AnthropicCapability;
pub use gemini::GeminiCapability;
pub use ollama::OllamaCapability;
pub use types::AiResponse;

use async_trait::async_trait;

/// Failure of a single call to an AI provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no API key configured for {0}")]
    MissingApiKey(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("could not decode provider response: {0}")]
    Decode(String),
}

/// Transport errors drop their URL: some providers authenticate through
/// the query string and these errors end up in logs.
impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Http(e.without_url())
    }
}

/// An asynchronous chat endpoint: one prompt in, one response out.
///
/// Implementations must not retry; the caller decides what a failure means.
#[async_trait]
pub trait AiCapability: Send + Sync {
    /// Short provider id for logs ("anthropic", "gemini", "ollama", ...).
    fn name(&self) -> &str;

    async fn chat(&self, prompt: &str) -> Result<AiResponse, ProviderError>;
}

/// Read an error response body, capped so logs stay readable.
pub(crate) async fn error_body(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let body = body.chars().take(300).collect();
    ProviderError::Api { status, body }
}
