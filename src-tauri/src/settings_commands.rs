//! Settings panel Tauri commands.
//!
//! Handles:
//! - Provider configuration (get/set active provider)
//! - API key storage (OS keychain via keyring crate + env var)
//! - Provider connection testing
//!
//! A provider change takes effect on the next launch: the readiness
//! monitor resolves the provider once and hands the converter a fixed
//! capability.

use crate::config::AppConfig;
use crate::llm::provider::{self, KEYRING_SERVICE};
use crate::llm::{AiCapability, AnthropicCapability, GeminiCapability, OllamaCapability};

/// Tauri command: get provider configuration for the settings panel.
#[tauri::command]
pub fn get_provider_config() -> Result<serde_json::Value, String> {
    let config = AppConfig::load();
    let providers = provider::all_providers();
    let active = provider::resolve_provider(&config);
    let configured: Vec<String> = providers
        .iter()
        .filter(|p| provider::is_provider_configured(&p.id))
        .map(|p| p.id.clone())
        .collect();

    Ok(serde_json::json!({
        "activeProvider": active,
        "providers": providers,
        "configuredProviders": configured,
    }))
}

/// Tauri command: persist the preferred provider to the config file.
#[tauri::command]
pub fn set_active_provider(provider_id: String) -> Result<(), String> {
    let provider_id = provider_id.to_lowercase();
    if !provider::is_known_provider(&provider_id) {
        return Err(format!("Unknown provider: {}", provider_id));
    }
    let mut config = AppConfig::load();
    config.provider = Some(provider_id.clone());
    config.save()?;
    log::info!("[SETTINGS] Active provider set to: {}", provider_id);
    Ok(())
}

/// Tauri command: save an API key to the OS keychain.
#[tauri::command]
pub fn save_api_key(provider_id: String, api_key: String) -> Result<(), String> {
    let env_key = match provider::env_key_for(&provider_id) {
        Some(k) => k,
        None if provider_id == "ollama" => return Ok(()), // No API key needed
        None => return Err(format!("Unknown provider: {}", provider_id)),
    };

    let entry = keyring::Entry::new(KEYRING_SERVICE, &provider_id)
        .map_err(|e| format!("Keyring error: {}", e))?;
    entry
        .set_password(&api_key)
        .map_err(|e| format!("Failed to save key: {}", e))?;

    // Also set as env var so the current session picks it up immediately
    std::env::set_var(env_key, &api_key);

    log::info!("[SETTINGS] API key saved for provider: {}", provider_id);
    Ok(())
}

/// Tauri command: test a provider's API connection.
///
/// Sends a minimal prompt and checks for a non-empty answer.
#[tauri::command]
pub async fn test_provider(provider_id: String) -> Result<bool, String> {
    let config = AppConfig::load();
    let capability: Box<dyn AiCapability> = match provider_id.as_str() {
        "anthropic" => Box::new(
            AnthropicCapability::from_env(config.anthropic_model).map_err(|e| e.to_string())?,
        ),
        "gemini" => Box::new(
            GeminiCapability::from_env(config.gemini_model).map_err(|e| e.to_string())?,
        ),
        "ollama" => Box::new(OllamaCapability::new(&config.ollama_url, &config.ollama_model)),
        _ => return Err(format!("Unknown provider: {}", provider_id)),
    };

    match capability.chat("Reply with just: ok").await {
        Ok(resp) => {
            let ok = !resp.normalize().trim().is_empty();
            log::info!("[SETTINGS] Test {} — answered: {}", provider_id, ok);
            Ok(ok)
        }
        Err(e) => {
            log::warn!("[SETTINGS] Test {} failed: {}", provider_id, e);
            Ok(false)
        }
    }
}
