//! Convert pipeline command.
//!
//! editor contents + selected language → prompt → AI capability → output pane.
//! Conversion failures are diagnostics, not command errors: the frontend
//! always gets the resulting state back and renders it.

use crate::convert::{ConversionState, Converter};

/// Tauri command: Convert button.
///
/// Uses the editor text and language already pushed via `set_input_code`
/// and `set_target_language`. The busy flag and output stream to the
/// webview through "conversion-state" events while this runs.
#[tauri::command]
pub async fn convert_code(
    converter: tauri::State<'_, Converter>,
) -> Result<ConversionState, String> {
    let pipeline_start = std::time::Instant::now();

    match converter.convert_current().await {
        Ok(code) => log::info!(
            "[PIPELINE] Converted in {}ms — {} lines",
            pipeline_start.elapsed().as_millis(),
            code.lines().count()
        ),
        Err(e) => log::warn!("[PIPELINE] No output: {}", e),
    }

    Ok(converter.snapshot())
}
