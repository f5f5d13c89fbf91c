use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::PermitPool;
use crate::permit_gate::PermitGate;

/// Background thread that restores a [`PermitPool`] once per window.
///
/// Ticks are scheduled on a fixed cadence (`start + n * window`), not relative
/// to when the previous restore finished, so a slow restore never shifts the
/// long-run tick rate. If the thread wakes a whole window late or more, the
/// missed ticks collapse into the one restore already performed.
///
/// The thread exits when [`stop`](Self::stop) is called or the scheduler is
/// dropped; both close the stop channel and join the thread.
pub(crate) struct RefillScheduler {
    /// Dropping the sender disconnects the channel and ends the loop
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RefillScheduler {
    /// Starts the refill thread. The first restore happens one full window
    /// after this call.
    pub(crate) fn spawn(
        pool: Arc<PermitPool>,
        window: Duration,
        refills: Arc<AtomicU64>,
    ) -> io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("refill-gate-scheduler".into())
            .spawn(move || {
                tracing::info!(limit = pool.limit(), ?window, "refill scheduler started");
                let mut next = Instant::now().checked_add(window);

                loop {
                    let signal = match next {
                        Some(deadline) => {
                            stop_rx.recv_timeout(deadline.saturating_duration_since(Instant::now()))
                        }
                        // Window too long to represent as a deadline: only a stop ends the wait.
                        None => stop_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
                    };
                    match signal {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    refills.fetch_add(1, Ordering::Release);
                    pool.restore();
                    next = next_tick(next, window, Instant::now());
                }

                tracing::info!(?window, "refill scheduler stopped");
            })?;

        Ok(RefillScheduler {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Signals the thread to exit and waits for it. Idempotent.
    pub(crate) fn stop(&mut self) {
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("refill scheduler thread panicked");
            }
        }
    }
}

impl Drop for RefillScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Advances the cadence by one window, skipping any ticks that are already
/// in the past at `now`.
fn next_tick(current: Option<Instant>, window: Duration, now: Instant) -> Option<Instant> {
    let next = current?.checked_add(window)?;
    if next > now {
        return Some(next);
    }

    let skipped = (now - next).as_nanos() / window.as_nanos() + 1;
    let advance = u64::try_from(skipped.checked_mul(window.as_nanos())?).ok()?;
    tracing::warn!(skipped, ?window, "refill scheduler fell behind, coalescing missed ticks");
    next.checked_add(Duration::from_nanos(advance))
}
