//! Readiness monitor — waits for the AI capability to become callable.
//!
//! A background task asks a `CapabilityProbe` for the capability on a fixed
//! interval. The first hit is published on a `watch` channel and the task
//! ends. Consumers hold a `Readiness` handle: they can check it without
//! blocking or await it once.
//!
//! There is no deadline: a capability that never shows up leaves the
//! converter not-ready forever. Dropping the monitor aborts the probe loop.

use crate::llm::AiCapability;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

type SharedCapability = Option<Arc<dyn AiCapability>>;

/// Something that can tell whether the AI capability is available yet.
#[async_trait]
pub trait CapabilityProbe: Send + Sync + 'static {
    async fn probe(&self) -> Option<Arc<dyn AiCapability>>;
}

/// A host-provided handle that starts empty and gets a capability installed
/// into it later. Probing it is just a read.
#[derive(Clone, Default)]
pub struct CapabilitySlot {
    inner: Arc<Mutex<SharedCapability>>,
}

impl CapabilitySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, capability: Arc<dyn AiCapability>) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(capability);
    }
}

#[async_trait]
impl CapabilityProbe for CapabilitySlot {
    async fn probe(&self) -> Option<Arc<dyn AiCapability>> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Read side of the readiness signal.
#[derive(Clone)]
pub struct Readiness {
    rx: watch::Receiver<SharedCapability>,
}

impl Readiness {
    /// Already ready with the given capability.
    pub fn ready(capability: Arc<dyn AiCapability>) -> Self {
        let (_tx, rx) = watch::channel(Some(capability));
        Self { rx }
    }

    /// Never becomes ready.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(None);
        Self { rx }
    }

    pub fn is_ready(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// The capability, if it has been detected.
    pub fn capability(&self) -> Option<Arc<dyn AiCapability>> {
        self.rx.borrow().clone()
    }

    /// Wait until the capability is detected. Returns `None` if the
    /// monitor went away first.
    pub async fn wait(&self) -> Option<Arc<dyn AiCapability>> {
        let mut rx = self.rx.clone();
        let capability = rx.wait_for(Option::is_some).await.ok()?.clone();
        capability
    }
}

/// Owns the probe loop. Dropping it stops probing.
pub struct ReadinessMonitor {
    task: JoinHandle<()>,
}

impl ReadinessMonitor {
    /// Start probing every `interval`. Must be called inside a tokio runtime.
    pub fn start<P: CapabilityProbe>(probe: P, interval: Duration) -> (Self, Readiness) {
        let (tx, rx) = watch::channel(None);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut attempts: u64 = 0;
            loop {
                ticker.tick().await;
                attempts += 1;
                if let Some(capability) = probe.probe().await {
                    log::info!(
                        "[READY] AI is ready ({}) after {} probe(s)",
                        capability.name(),
                        attempts
                    );
                    tx.send_replace(Some(capability));
                    break;
                }
                if attempts == 1 {
                    log::info!("[READY] AI not available yet, polling every {:?}", interval);
                }
            }
        });
        (Self { task }, Readiness { rx })
    }

    /// True once the probe loop has ended (capability found or aborted).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ReadinessMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{AiResponse, ProviderError};

    struct Echo;

    #[async_trait]
    impl AiCapability for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn chat(&self, prompt: &str) -> Result<AiResponse, ProviderError> {
            Ok(AiResponse::Text(prompt.to_string()))
        }
    }

    #[test]
    fn never_is_not_ready() {
        let readiness = Readiness::never();
        assert!(!readiness.is_ready());
        assert!(readiness.capability().is_none());
    }

    #[tokio::test]
    async fn ready_handle_resolves_immediately() {
        let readiness = Readiness::ready(Arc::new(Echo));
        assert!(readiness.is_ready());
        let cap = readiness.wait().await.expect("should be ready");
        assert_eq!(cap.name(), "echo");
    }

    #[tokio::test]
    async fn wait_returns_none_when_sender_is_gone() {
        assert!(Readiness::never().wait().await.is_none());
    }

    #[tokio::test]
    async fn slot_probe_reflects_install() {
        let slot = CapabilitySlot::new();
        assert!(slot.probe().await.is_none());
        slot.install(Arc::new(Echo));
        assert_eq!(slot.probe().await.unwrap().name(), "echo");
    }
}
