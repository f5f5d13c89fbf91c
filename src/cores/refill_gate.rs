use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::refill_scheduler::RefillScheduler;
use super::PermitPool;
use crate::error::{AcquireResult, GateError};
use crate::gate_config::GateConfig;
use crate::permit_gate::PermitGate;
use crate::types::Uint;

/// Blocking throttle that refills to full once per window.
///
/// A `RefillGate` owns a [`PermitPool`] and the background thread that
/// restores it. Callers take one permit per outbound call with
/// [`acquire`](PermitGate::acquire); once the window's permits are spent,
/// callers block until the next tick restores the deficit.
///
/// # Policy
///
/// Each tick adds back only what was consumed (`limit - available`), never
/// more. This is a coarse fixed-tick policy rather than a true sliding
/// window: up to `2 * limit` calls can pass in a short span straddling a tick.
///
/// # Lifecycle
///
/// The scheduler starts in the constructor and runs until [`stop`](Self::stop)
/// or until the gate is dropped. After a stop, permits still in the pool stay
/// usable but no new capacity appears.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use refill_gate::cores::RefillGate;
/// use refill_gate::PermitGate;
///
/// let gate = RefillGate::new(5, Duration::from_millis(50)).unwrap();
/// for _ in 0..5 {
///     gate.acquire();
/// }
/// assert_eq!(gate.available(), 0);
///
/// // Blocks until the next tick.
/// gate.acquire();
/// assert!(gate.refill_count() >= 1);
/// gate.stop();
/// ```
pub struct RefillGate {
    pool: Arc<PermitPool>,
    window: Duration,
    /// Ticks fired by the scheduler; survives `stop`
    refills: Arc<AtomicU64>,
    scheduler: Mutex<Option<RefillScheduler>>,
}

impl RefillGate {
    /// Creates a full gate with `limit` permits per `window` and starts its
    /// refill scheduler.
    ///
    /// # Errors
    ///
    /// * [`GateError::Config`] if `limit` or `window` is zero; no thread is
    ///   started in that case
    /// * [`GateError::Spawn`] if the scheduler thread could not be created
    pub fn new(limit: Uint, window: Duration) -> Result<Self, GateError> {
        Self::from_config(&GateConfig::new(limit, window))
    }

    /// Creates a gate from a [`GateConfig`]. See [`new`](Self::new).
    pub fn from_config(config: &GateConfig) -> Result<Self, GateError> {
        config.validate()?;

        let pool = Arc::new(PermitPool::new(config.limit)?);
        let refills = Arc::new(AtomicU64::new(0));
        let scheduler = RefillScheduler::spawn(Arc::clone(&pool), config.window, Arc::clone(&refills))
            .map_err(GateError::Spawn)?;

        Ok(RefillGate {
            pool,
            window: config.window,
            refills,
            scheduler: Mutex::new(Some(scheduler)),
        })
    }

    /// Interval between refills.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Number of refill ticks the scheduler has fired. A tick is counted
    /// before its restore, so a caller admitted by a tick always sees it.
    pub fn refill_count(&self) -> u64 {
        self.refills.load(Ordering::Acquire)
    }

    /// Number of callers currently blocked waiting for a permit.
    pub fn waiting(&self) -> usize {
        self.pool.waiting()
    }

    /// Whether the refill scheduler is still running.
    pub fn is_running(&self) -> bool {
        self.scheduler.lock().is_some()
    }

    /// Stops the refill scheduler and waits for its thread to exit.
    ///
    /// Calling it again is a no-op. Callers already blocked in `acquire`
    /// stay blocked unless permits remain in the pool.
    pub fn stop(&self) {
        let scheduler = self.scheduler.lock().take();
        if let Some(mut scheduler) = scheduler {
            scheduler.stop();
        }
    }
}

impl PermitGate for RefillGate {
    #[inline]
    fn acquire(&self) {
        self.pool.acquire()
    }

    #[inline]
    fn try_acquire(&self) -> bool {
        self.pool.try_acquire()
    }

    #[inline]
    fn acquire_timeout(&self, timeout: Duration) -> AcquireResult {
        self.pool.acquire_timeout(timeout)
    }

    #[inline]
    fn available(&self) -> Uint {
        self.pool.available()
    }

    #[inline]
    fn limit(&self) -> Uint {
        self.pool.limit()
    }
}

impl Drop for RefillGate {
    fn drop(&mut self) {
        self.stop();
    }
}
