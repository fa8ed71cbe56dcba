//! Conversion state shared with the webview.
//!
//! UI-agnostic: the desktop shell serializes `ConversionState` as-is and
//! renders it; nothing here depends on Tauri.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sample shown in the input editor at startup and after reset.
pub const DEFAULT_INPUT: &str = "function helloWorld() {\n  console.log(\"Hello World!\");\n}";

/// Target languages offered by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedLanguage {
    #[serde(rename = "C++")]
    Cpp,
    #[serde(rename = "C#")]
    CSharp,
    Python,
    Java,
    Go,
    Rust,
    JavaScript,
    TypeScript,
}

impl SupportedLanguage {
    /// Selector order.
    pub const ALL: [SupportedLanguage; 8] = [
        SupportedLanguage::Cpp,
        SupportedLanguage::CSharp,
        SupportedLanguage::Python,
        SupportedLanguage::Java,
        SupportedLanguage::Go,
        SupportedLanguage::Rust,
        SupportedLanguage::JavaScript,
        SupportedLanguage::TypeScript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedLanguage::Cpp => "C++",
            SupportedLanguage::CSharp => "C#",
            SupportedLanguage::Python => "Python",
            SupportedLanguage::Java => "Java",
            SupportedLanguage::Go => "Go",
            SupportedLanguage::Rust => "Rust",
            SupportedLanguage::JavaScript => "JavaScript",
            SupportedLanguage::TypeScript => "TypeScript",
        }
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportedLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unsupported language: {}", s))
    }
}

/// Where the converter is in its request lifecycle. Drives the Convert
/// button (spinner vs. play icon) and the output pane styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConvertPhase {
    #[default]
    Idle,
    Converting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionState {
    pub input_text: String,
    pub output_text: String,
    pub target_language: SupportedLanguage,
    /// True only between dispatch of an AI call and its resolution.
    pub is_busy: bool,
    pub is_ai_ready: bool,
    pub notification_visible: bool,
    pub phase: ConvertPhase,
}

impl ConversionState {
    pub fn new(target_language: SupportedLanguage) -> Self {
        Self {
            input_text: DEFAULT_INPUT.to_string(),
            output_text: String::new(),
            target_language,
            is_busy: false,
            is_ai_ready: false,
            notification_visible: false,
            phase: ConvertPhase::Idle,
        }
    }
}

impl Default for ConversionState {
    fn default() -> Self {
        Self::new(SupportedLanguage::Python)
    }
}
