//! Simple Tauri command handlers.
//!
//! Thin wrappers that bridge frontend invoke() calls to the converter.
//! Each command does one thing: read state, update the editor, reset, copy.
//!
//! The convert request lives in pipeline.rs instead.

use crate::convert::{ConversionState, Converter, SupportedLanguage};

/// Tauri command: current conversion state.
///
/// Called by the webview on load; afterwards it follows the
/// "conversion-state" event.
#[tauri::command]
pub fn get_conversion_state(converter: tauri::State<'_, Converter>) -> ConversionState {
    converter.snapshot()
}

/// Tauri command: languages for the target selector, in display order.
#[tauri::command]
pub fn get_languages() -> Vec<SupportedLanguage> {
    SupportedLanguage::ALL.to_vec()
}

/// Tauri command: the input editor changed.
#[tauri::command]
pub fn set_input_code(converter: tauri::State<'_, Converter>, code: String) {
    converter.set_input(code);
}

/// Tauri command: the target language selector changed.
#[tauri::command]
pub fn set_target_language(
    converter: tauri::State<'_, Converter>,
    language: String,
) -> Result<(), String> {
    let language: SupportedLanguage = language.parse()?;
    converter.select_language(language);
    log::info!("[SETTINGS] Target language: {}", language);
    Ok(())
}

/// Tauri command: Reset button.
#[tauri::command]
pub fn reset_converter(converter: tauri::State<'_, Converter>) -> ConversionState {
    converter.reset();
    converter.snapshot()
}

/// Tauri command: Copy button on the output pane.
///
/// Async so it runs on the tokio runtime, which owns the notification
/// hide timer. Clipboard errors go straight back to the frontend.
#[tauri::command]
pub async fn copy_output(converter: tauri::State<'_, Converter>) -> Result<(), String> {
    converter.copy_current_output().map_err(|e| e.to_string())
}
