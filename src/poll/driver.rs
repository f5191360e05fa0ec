use crate::session::ResourceStatus;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Polling cadence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between refreshes while processing
    pub interval: Duration,

    /// Stop after this many refreshes; `None` polls until the status changes
    pub max_ticks: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_ticks: None,
        }
    }
}

/// Running poll driver
///
/// Dropping the handle cancels the driver.
pub struct PollHandle {
    cancelled: Arc<AtomicBool>,
    stopped: Arc<watch::Sender<bool>>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop the driver; no tick fires afterwards
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.stopped.send_replace(true);
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Whether the driver task has exited (cancelled, capped, or status source gone)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Whether the driver will never tick again
    ///
    /// Set as soon as the driver gives up, which may be slightly before
    /// `is_finished` turns true.
    pub fn is_stopped(&self) -> bool {
        *self.stopped.borrow()
    }

    /// Resolves once the driver will never tick again
    pub async fn stopped(&self) {
        let mut rx = self.stopped.subscribe();
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Call `on_tick` every `config.interval` while `status` reads `Processing`
///
/// The first tick comes one interval after the status enters `Processing`.
/// Leaving `Processing` stops ticking immediately; re-entering it starts a
/// fresh interval. Ticks never overlap: the next interval is measured from
/// when the previous `on_tick` finished.
pub fn start_polling<F, Fut>(
    mut status: watch::Receiver<ResourceStatus>,
    config: PollConfig,
    mut on_tick: F,
) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);
    let (stopped, _) = watch::channel(false);
    let stopped = Arc::new(stopped);
    let stop_signal = StopSignal(Arc::clone(&stopped));

    let task = tokio::spawn(async move {
        // Fires on every exit path, including abort
        let _stop_signal = stop_signal;
        let mut ticks: u32 = 0;

        loop {
            if !status.borrow_and_update().is_processing() {
                if status.changed().await.is_err() {
                    debug!("Status source closed, poll driver exiting");
                    return;
                }
                continue;
            }

            debug!("Polling every {:?}", config.interval);

            let mut interval =
                tokio::time::interval_at(Instant::now() + config.interval, config.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    changed = status.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        if !status.borrow_and_update().is_processing() {
                            debug!("Status left processing, polling stopped");
                            break;
                        }
                    }

                    _ = interval.tick() => {
                        if flag.load(Ordering::SeqCst) {
                            return;
                        }
                        if !status.borrow().is_processing() {
                            break;
                        }

                        if let Some(max) = config.max_ticks {
                            if ticks >= max {
                                warn!("Giving up after {} polls", max);
                                return;
                            }
                        }

                        ticks += 1;
                        on_tick().await;
                    }
                }
            }
        }
    });

    PollHandle {
        cancelled,
        stopped,
        task,
    }
}

struct StopSignal(Arc<watch::Sender<bool>>);

impl Drop for StopSignal {
    fn drop(&mut self) {
        self.0.send_replace(true);
    }
}
