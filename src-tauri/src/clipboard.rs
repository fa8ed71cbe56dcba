//! Clipboard capability — write-only.
//!
//! The native implementation uses arboard; webview `navigator.clipboard`
//! is not reliable inside a Tauri window.

/// Failure to place text on the clipboard. Not recovered by the converter.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard. A fresh arboard handle is opened per write.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))?;
        log::info!("[COPY] Copied {} chars to clipboard", text.len());
        Ok(())
    }
}
