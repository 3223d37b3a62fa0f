use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{sleep, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::anyhow;

use crate::svc::telemetry::{TelemetrySink, TelemetrySnapshot};

/// Sends one snapshot upstream. Runs on the telemetry thread, so it may block,
/// but it should bound its own network timeout.
pub type Transport = Box<dyn FnMut(&TelemetrySnapshot) -> anyhow::Result<()> + Send>;

#[derive(Default, Debug, Eq, PartialEq)]
pub struct TelemetryStats {
    pub sent: usize,
    pub failed: usize,
    /// Overwritten by a newer snapshot before the thread picked them up
    pub replaced: usize,
}

pub struct StdTelemetryConfig {
    pub wakeup_period: Duration,
    pub stack_size: usize,
}

impl Default for StdTelemetryConfig {
    fn default() -> Self {
        Self {
            wakeup_period: Duration::from_millis(100),
            stack_size: 8 * 1024,
        }
    }
}

/// Publishes snapshots from a dedicated thread, so that a slow or unreachable
/// endpoint never holds the gate loop.
pub struct StdTelemetry {
    thread: Option<JoinHandle<TelemetryStats>>,
    pending: PendingSlot,
    replaced: AtomicUsize,
    continue_running: Arc<AtomicBool>,
}

impl StdTelemetry {
    pub fn new(transport: Transport) -> anyhow::Result<Self> {
        Self::new_with_config(transport, StdTelemetryConfig::default())
    }

    pub fn new_with_config(
        transport: Transport,
        config: StdTelemetryConfig,
    ) -> anyhow::Result<Self> {
        log::info!("Starting telemetry");

        let pending = PendingSlot::default();
        let continue_running = Arc::new(AtomicBool::new(true));

        let thread = spawn_thread(
            config,
            transport,
            pending.clone(),
            continue_running.clone(),
        )?;

        Ok(StdTelemetry {
            thread: Some(thread),
            pending,
            replaced: AtomicUsize::new(0),
            continue_running,
        })
    }

    pub fn stop(&mut self) -> Option<TelemetryStats> {
        self.continue_running.store(false, Ordering::Release);

        let mut stats = self.thread.take()?.join().ok()?;
        stats.replaced = self.replaced.load(Ordering::Relaxed);

        log::info!(
            "Telemetry stopped, sent: {} failed: {} replaced: {}",
            stats.sent,
            stats.failed,
            stats.replaced
        );

        Some(stats)
    }
}

impl Drop for StdTelemetry {
    fn drop(&mut self) {
        self.stop();
    }
}

impl TelemetrySink for StdTelemetry {
    fn publish(&self, snapshot: TelemetrySnapshot) -> anyhow::Result<()> {
        if self.thread.is_none() {
            return Err(anyhow!("Telemetry is stopped"));
        }

        if let Some(unsent) = self.pending.replace(snapshot)? {
            self.replaced.fetch_add(1, Ordering::Relaxed);
            log::debug!("Dropping unsent snapshot {unsent}");
        }

        Ok(())
    }
}

fn spawn_thread(
    config: StdTelemetryConfig,
    mut transport: Transport,
    pending: PendingSlot,
    continue_running: Arc<AtomicBool>,
) -> anyhow::Result<JoinHandle<TelemetryStats>> {
    let StdTelemetryConfig {
        wakeup_period,
        stack_size,
    } = config;

    let thread = std::thread::Builder::new()
        .name("telemetry".into())
        .stack_size(stack_size)
        .spawn(move || {
            let mut stats = TelemetryStats::default();

            loop {
                let next_wakeup = Instant::now() + wakeup_period;

                if let Some(snapshot) = pending.take() {
                    let start = Instant::now();
                    match transport(&snapshot) {
                        Ok(()) => {
                            stats.sent += 1;
                            log::info!(
                                "Published {snapshot} in {}ms",
                                (Instant::now() - start).as_millis()
                            );
                        }
                        Err(e) => {
                            stats.failed += 1;
                            log::warn!("Cannot publish {snapshot}: {e}");
                        }
                    }
                }

                if !continue_running.load(Ordering::Acquire) {
                    break;
                }

                if let Some(delay) = next_wakeup.checked_duration_since(Instant::now()) {
                    sleep(delay);
                }
            }

            stats
        })?;

    Ok(thread)
}

/// Holds at most one snapshot. Both reported fields are cumulative, so a newer
/// snapshot makes an unsent older one redundant.
#[derive(Clone, Default)]
struct PendingSlot(Arc<Mutex<Option<TelemetrySnapshot>>>);

impl PendingSlot {
    fn replace(&self, snapshot: TelemetrySnapshot) -> anyhow::Result<Option<TelemetrySnapshot>> {
        self.0
            .lock()
            .map(|mut x| x.replace(snapshot))
            .map_err(|_| anyhow!("Cannot publish"))
    }

    fn take(&self) -> Option<TelemetrySnapshot> {
        self.0.lock().ok().and_then(|mut x| x.take())
    }
}
