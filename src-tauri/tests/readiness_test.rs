//! Readiness monitor lifecycle: probing cadence, stop-on-detection, and
//! stop-on-drop. Runs on tokio's paused clock.

use async_trait::async_trait;
use code_converter_lib::convert::{CapabilityProbe, ReadinessMonitor};
use code_converter_lib::llm::{AiCapability, AiResponse, ProviderError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const INTERVAL: Duration = Duration::from_millis(300);

struct Stub;

#[async_trait]
impl AiCapability for Stub {
    fn name(&self) -> &str {
        "stub"
    }

    async fn chat(&self, _prompt: &str) -> Result<AiResponse, ProviderError> {
        Ok(AiResponse::Text(String::new()))
    }
}

/// Counts probes; yields the capability once `available` is set.
#[derive(Clone, Default)]
struct CountingProbe {
    probes: Arc<AtomicUsize>,
    available: Arc<AtomicBool>,
}

impl CountingProbe {
    fn count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CapabilityProbe for CountingProbe {
    async fn probe(&self) -> Option<Arc<dyn AiCapability>> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if self.available.load(Ordering::SeqCst) {
            Some(Arc::new(Stub))
        } else {
            None
        }
    }
}

#[tokio::test(start_paused = true)]
async fn not_ready_until_probe_yields() {
    let _ = env_logger::builder().is_test(true).try_init();
    let probe = CountingProbe::default();
    let (monitor, readiness) = ReadinessMonitor::start(probe.clone(), INTERVAL);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(!readiness.is_ready());
    assert!(readiness.capability().is_none());
    // Ticks at 0, 300, 600 and 900ms.
    assert!((3..=4).contains(&probe.count()));
    assert!(!monitor.is_finished());

    probe.available.store(true, Ordering::SeqCst);
    let capability = readiness.wait().await.expect("capability after install");
    assert_eq!(capability.name(), "stub");
    assert!(readiness.is_ready());
}

#[tokio::test(start_paused = true)]
async fn probing_stops_after_detection() {
    let _ = env_logger::builder().is_test(true).try_init();
    let probe = CountingProbe::default();
    probe.available.store(true, Ordering::SeqCst);
    let (monitor, readiness) = ReadinessMonitor::start(probe.clone(), INTERVAL);

    readiness.wait().await.expect("ready on first probe");
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(probe.count(), 1);
    assert!(monitor.is_finished());
    assert!(readiness.is_ready());
}

#[tokio::test(start_paused = true)]
async fn dropping_monitor_stops_probing() {
    let _ = env_logger::builder().is_test(true).try_init();
    let probe = CountingProbe::default();
    let (monitor, readiness) = ReadinessMonitor::start(probe.clone(), INTERVAL);

    tokio::time::sleep(Duration::from_secs(1)).await;
    drop(monitor);
    tokio::task::yield_now().await;
    let after_drop = probe.count();

    probe.available.store(true, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(probe.count(), after_drop);
    assert!(!readiness.is_ready());
    assert!(readiness.wait().await.is_none());
}
