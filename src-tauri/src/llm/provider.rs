//! Provider metadata, resolution, and the readiness probe.
//!
//! Which provider backs the converter is decided once, when the probe is built:
//! 1. LLM_PROVIDER env var (explicit override)
//! 2. `provider` in the config file
//! 3. First provider with an API key set (env var or keychain)
//! 4. "ollama" as final default (local, no key)

use super::{AiCapability, AnthropicCapability, GeminiCapability, OllamaCapability};
use crate::config::AppConfig;
use crate::convert::readiness::CapabilityProbe;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const KEYRING_SERVICE: &str = "code-converter";

/// Provider metadata exposed to the settings panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    /// Env var holding the API key; `None` for keyless providers.
    pub env_key: Option<String>,
}

/// All known providers and their display info.
pub fn all_providers() -> Vec<ProviderInfo> {
    vec![
        ProviderInfo {
            id: "anthropic".to_string(),
            name: "Claude Haiku (Anthropic)".to_string(),
            env_key: Some("ANTHROPIC_API_KEY".to_string()),
        },
        ProviderInfo {
            id: "gemini".to_string(),
            name: "Gemini Flash (Google)".to_string(),
            env_key: Some("GEMINI_API_KEY".to_string()),
        },
        ProviderInfo {
            id: "ollama".to_string(),
            name: "Ollama (Local)".to_string(),
            env_key: None,
        },
    ]
}

/// Env var that holds the API key for a provider.
pub fn env_key_for(provider_id: &str) -> Option<&'static str> {
    match provider_id {
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        "gemini" => Some("GEMINI_API_KEY"),
        _ => None,
    }
}

pub fn is_known_provider(provider_id: &str) -> bool {
    matches!(provider_id, "anthropic" | "gemini" | "ollama")
}

/// Check if a provider has an API key in the environment.
/// Ollama needs no key and always counts as configured.
pub fn is_provider_configured(provider_id: &str) -> bool {
    if provider_id == "ollama" {
        return true;
    }
    env_key_for(provider_id)
        .and_then(|k| std::env::var(k).ok())
        .map(|k| !k.is_empty())
        .unwrap_or(false)
}

/// Check if a provider has an API key available (env var or keychain).
/// A key found only in the keychain is loaded into the env so the
/// provider constructors can read it.
pub fn has_api_key(provider_id: &str) -> bool {
    let Some(env_key) = env_key_for(provider_id) else {
        return false;
    };

    if is_provider_configured(provider_id) {
        return true;
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, provider_id) {
        if let Ok(key) = entry.get_password() {
            if !key.is_empty() {
                std::env::set_var(env_key, &key);
                log::info!("[SETTINGS] Loaded {} key from OS keychain", provider_id);
                return true;
            }
        }
    }

    false
}

/// Determine which provider to use. See module docs for the priority order.
pub fn resolve_provider(config: &AppConfig) -> String {
    resolve_provider_with(config, &has_api_key)
}

/// `resolve_provider` with the key lookup supplied by the caller.
fn resolve_provider_with(config: &AppConfig, has_key: &dyn Fn(&str) -> bool) -> String {
    if let Ok(p) = std::env::var("LLM_PROVIDER") {
        let p = p.to_lowercase();
        if is_known_provider(&p) {
            return p;
        }
        log::warn!("[LLM] Ignoring unknown LLM_PROVIDER: {}", p);
    }

    if let Some(p) = config.provider.as_deref().map(str::to_lowercase) {
        if is_known_provider(&p) {
            return p;
        }
    }

    if has_key("anthropic") {
        return "anthropic".to_string();
    }
    if has_key("gemini") {
        return "gemini".to_string();
    }

    "ollama".to_string()
}

/// Probe that yields the configured provider once it is usable:
/// an API key is present, or the local Ollama server answers.
///
/// The provider is resolved once, when the probe is built, so the keychain
/// is read at most once per provider. Each probe only re-checks the env
/// var (a key saved from settings lands there) or Ollama reachability.
pub struct ProviderProbe {
    config: AppConfig,
    provider: String,
}

impl ProviderProbe {
    pub fn new(config: AppConfig) -> Self {
        Self::with_key_lookup(config, &has_api_key)
    }

    fn with_key_lookup(config: AppConfig, has_key: &dyn Fn(&str) -> bool) -> Self {
        let provider = resolve_provider_with(&config, has_key);
        if env_key_for(&provider).is_some() {
            // Pulls a keychain-only key into the env for `from_env`.
            has_key(&provider);
        }
        log::info!("[LLM] Waiting for provider: {}", provider);
        Self { config, provider }
    }

    /// The provider this probe waits for.
    pub fn provider(&self) -> &str {
        &self.provider
    }
}

#[async_trait]
impl CapabilityProbe for ProviderProbe {
    async fn probe(&self) -> Option<Arc<dyn AiCapability>> {
        match self.provider.as_str() {
            "anthropic" if is_provider_configured("anthropic") => {
                let model = self.config.anthropic_model.clone();
                AnthropicCapability::from_env(model)
                    .ok()
                    .map(|c| Arc::new(c) as Arc<dyn AiCapability>)
            }
            "gemini" if is_provider_configured("gemini") => {
                let model = self.config.gemini_model.clone();
                GeminiCapability::from_env(model)
                    .ok()
                    .map(|c| Arc::new(c) as Arc<dyn AiCapability>)
            }
            "ollama" => {
                let ollama = OllamaCapability::new(&self.config.ollama_url, &self.config.ollama_model);
                if ollama.is_reachable().await {
                    Some(Arc::new(ollama) as Arc<dyn AiCapability>)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
