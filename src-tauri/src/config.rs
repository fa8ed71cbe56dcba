//! App configuration persistence.
//!
//! Stored as JSON at `~/.config/code-converter/config.json` (macOS:
//! `~/Library/Application Support/code-converter/config.json`).
//! A missing or unreadable file yields the defaults. `OLLAMA_URL` in the
//! environment overrides the stored Ollama endpoint.

use crate::convert::SupportedLanguage;
use crate::llm::prompts::OLLAMA_MODEL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// "anthropic" | "gemini" | "ollama"; `None` means auto-detect.
    pub provider: Option<String>,
    pub anthropic_model: Option<String>,
    pub gemini_model: Option<String>,
    pub ollama_url: String,
    pub ollama_model: String,
    /// Readiness probe interval.
    pub poll_interval_ms: u64,
    /// How long the "Output Copied!" notification stays up.
    pub notification_ms: u64,
    pub default_language: SupportedLanguage,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: None,
            anthropic_model: None,
            gemini_model: None,
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: OLLAMA_MODEL.to_string(),
            poll_interval_ms: 300,
            notification_ms: 3000,
            default_language: SupportedLanguage::Python,
        }
    }
}

/// Directory holding the config file.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("code-converter")
}

impl AppConfig {
    /// Load from the default location, then apply env overrides.
    pub fn load() -> Self {
        let mut config = Self::load_from(&config_dir().join(CONFIG_FILE));
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            if !url.is_empty() {
                config.ollama_url = url;
            }
        }
        config
    }

    /// Load from an explicit path. Returns defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("[CONFIG] Invalid {}: {} — using defaults", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), String> {
        self.save_to(&config_dir().join(CONFIG_FILE))
    }

    /// Persist to an explicit path, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config dir: {}", e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        log::info!("[CONFIG] Saved {}", path.display());
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn notification_delay(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}
