//! Conversion domain — public API.
//!
//! `Converter` owns the `ConversionState` and is the only caller of the AI
//! capability. All mutations go through its methods; every mutation is
//! followed by a call to the state listener, if one is set.
//!
//! Overlapping `convert` calls are not fenced. Each call writes its own
//! result when it resolves, so the call that resolves last determines
//! `output_text` and `is_busy`, regardless of the order they were issued.

pub mod readiness;
pub mod state;

pub use readiness::{CapabilityProbe, CapabilitySlot, Readiness, ReadinessMonitor};
pub use state::{ConversionState, ConvertPhase, SupportedLanguage, DEFAULT_INPUT};

use crate::clipboard::{ClipboardError, ClipboardSink};
use crate::llm::{prompts, ProviderError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Why a conversion produced no output.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Please enter some code to convert.")]
    EmptyInput,
    #[error("AI is not ready yet. Try again later.")]
    NotReady,
    #[error("No response from AI")]
    EmptyResponse,
    #[error("AI provider failed: {0}")]
    ProviderFailure(#[from] ProviderError),
}

/// Called with a fresh snapshot after every state change.
pub type StateListener = Arc<dyn Fn(&ConversionState) + Send + Sync>;

/// Construction options for `Converter`.
#[derive(Clone)]
pub struct ConverterOptions {
    pub default_language: SupportedLanguage,
    pub notification_delay: Duration,
    pub listener: Option<StateListener>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            default_language: SupportedLanguage::Python,
            notification_delay: Duration::from_millis(3000),
            listener: None,
        }
    }
}

struct Inner {
    state: Mutex<ConversionState>,
    readiness: Readiness,
    clipboard: Arc<dyn ClipboardSink>,
    notification_delay: Duration,
    hide_task: Mutex<Option<JoinHandle<()>>>,
    /// Bumped on every copy; a hide timer only acts on its own copy.
    copies: AtomicU64,
    listener: Option<StateListener>,
}

/// The conversion orchestrator. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Converter {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Converter {
    pub fn new(readiness: Readiness, clipboard: Arc<dyn ClipboardSink>) -> Self {
        Self::with_options(readiness, clipboard, ConverterOptions::default())
    }

    pub fn with_options(
        readiness: Readiness,
        clipboard: Arc<dyn ClipboardSink>,
        options: ConverterOptions,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(ConversionState::new(options.default_language)),
                readiness,
                clipboard,
                notification_delay: options.notification_delay,
                hide_task: Mutex::new(None),
                copies: AtomicU64::new(0),
                listener: options.listener,
            }),
        }
    }

    /// Current state. `is_ai_ready` reflects the readiness signal as of now.
    pub fn snapshot(&self) -> ConversionState {
        let mut state = lock(&self.inner.state);
        state.is_ai_ready = self.inner.readiness.is_ready();
        state.clone()
    }

    /// Apply a mutation, refresh readiness, and notify the listener.
    /// The lock is released before the listener runs.
    fn update(&self, mutate: impl FnOnce(&mut ConversionState)) {
        let snapshot = {
            let mut state = lock(&self.inner.state);
            mutate(&mut state);
            state.is_ai_ready = self.inner.readiness.is_ready();
            state.clone()
        };
        if let Some(listener) = &self.inner.listener {
            listener(&snapshot);
        }
    }

    /// Await the readiness signal once and publish it to the listener.
    pub fn watch_readiness(&self) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            if let Some(capability) = this.inner.readiness.wait().await {
                log::info!("[READY] Conversion enabled via {}", capability.name());
                this.update(|_| {});
            }
        })
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|s| s.input_text = text);
    }

    pub fn select_language(&self, language: SupportedLanguage) {
        self.update(|s| s.target_language = language);
    }

    /// Translate `input` into `target` through the AI capability.
    ///
    /// Precondition failures (`EmptyInput`, `NotReady`) leave the state
    /// untouched and make no AI call. Once dispatched, the busy flag is
    /// cleared on every outcome; only a non-empty trimmed response is
    /// written to `output_text`. Errors are logged here and returned as
    /// values, never panics.
    pub async fn convert(
        &self,
        input: &str,
        target: SupportedLanguage,
    ) -> Result<String, ConvertError> {
        if input.trim().is_empty() {
            log::warn!("[CONVERT] {}", ConvertError::EmptyInput);
            return Err(ConvertError::EmptyInput);
        }

        let Some(capability) = self.inner.readiness.capability() else {
            log::warn!("[CONVERT] {}", ConvertError::NotReady);
            return Err(ConvertError::NotReady);
        };

        self.update(|s| {
            s.is_busy = true;
            s.output_text.clear();
            s.phase = ConvertPhase::Converting;
        });

        let prompt = prompts::build_convert_prompt(target, input);
        log::info!(
            "[CONVERT] {} chars → {} via {}",
            input.len(),
            target,
            capability.name()
        );
        let start = std::time::Instant::now();

        let result = match capability.chat(&prompt).await {
            Ok(response) => {
                let normalized = response.normalize();
                let code = normalized.trim();
                if code.is_empty() {
                    Err(ConvertError::EmptyResponse)
                } else {
                    Ok(code.to_string())
                }
            }
            Err(e) => Err(ConvertError::ProviderFailure(e)),
        };

        match &result {
            Ok(code) => {
                log::info!(
                    "[CONVERT] Done in {}ms ({} chars of {})",
                    start.elapsed().as_millis(),
                    code.len(),
                    target
                );
                let code = code.clone();
                self.update(|s| {
                    s.output_text = code;
                    s.is_busy = false;
                    s.phase = ConvertPhase::Succeeded;
                });
            }
            Err(e) => {
                log::error!("[CONVERT] Conversion failed: {}", e);
                self.update(|s| {
                    s.is_busy = false;
                    s.phase = ConvertPhase::Failed;
                });
            }
        }

        result
    }

    /// Convert the current editor contents into the selected language.
    pub async fn convert_current(&self) -> Result<String, ConvertError> {
        let (input, target) = {
            let state = lock(&self.inner.state);
            (state.input_text.clone(), state.target_language)
        };
        self.convert(&input, target).await
    }

    /// Clear the output and restore the sample input. Leaves the busy flag,
    /// readiness and target language alone.
    pub fn reset(&self) {
        self.update(|s| {
            s.output_text.clear();
            s.input_text = DEFAULT_INPUT.to_string();
            if !s.is_busy {
                s.phase = ConvertPhase::Idle;
            }
        });
    }

    /// Put `text` on the clipboard and show the notification for the
    /// configured delay. A copy while the notification is up restarts the
    /// delay. Clipboard failures are returned without touching state.
    ///
    /// Must be called inside a tokio runtime (the hide timer is a task).
    pub fn copy_output(&self, text: &str) -> Result<(), ClipboardError> {
        self.inner.clipboard.write_text(text)?;
        log::info!("[COPY] Output copied!");

        let mut hide_task = lock(&self.inner.hide_task);
        if let Some(previous) = hide_task.take() {
            previous.abort();
        }

        let mut generation = 0;
        self.update(|s| {
            generation = self.inner.copies.fetch_add(1, Ordering::SeqCst) + 1;
            s.notification_visible = true;
        });

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let delay = self.inner.notification_delay;
        *hide_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                Converter { inner }.hide_notification(generation);
            }
        }));
        Ok(())
    }

    /// Hide the notification unless a later copy has shown it again.
    fn hide_notification(&self, generation: u64) {
        self.update(|s| {
            if self.inner.copies.load(Ordering::SeqCst) == generation {
                s.notification_visible = false;
            }
        });
    }

    /// Copy whatever is currently in the output pane.
    pub fn copy_current_output(&self) -> Result<(), ClipboardError> {
        let output = lock(&self.inner.state).output_text.clone();
        self.copy_output(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullClipboard;

    impl ClipboardSink for NullClipboard {
        fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn stale_hide_timer_leaves_newer_notification_up() {
        let converter = Converter::new(Readiness::never(), Arc::new(NullClipboard));

        converter.copy_output("first").unwrap();
        converter.copy_output("second").unwrap();

        // The first copy's timer firing late must not hide the second.
        converter.hide_notification(1);
        assert!(converter.snapshot().notification_visible);

        converter.hide_notification(2);
        assert!(!converter.snapshot().notification_visible);
    }
}
