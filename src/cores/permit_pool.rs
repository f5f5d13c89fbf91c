use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::error::{AcquireError, AcquireResult, ConfigError};
use crate::permit_gate::PermitGate;
use crate::types::Uint;

/// Bounded pool of permits with a FIFO queue of blocked acquirers.
///
/// The pool starts full with `limit` permits. Each acquisition takes one
/// permit; when none is left, callers queue up and each sleeps on its own
/// condition variable. Only the queue head is woken when capacity appears,
/// and it hands the turn to its successor if permits remain.
///
/// A standalone pool is a fixed budget of `limit` permits: it never
/// replenishes itself, so once exhausted further callers block for good.
/// [`RefillGate`](super::RefillGate) pairs a pool with the scheduler that
/// restores it on a fixed cadence; use that for rate limiting.
///
/// # Invariants
///
/// - `0 <= available <= limit` at every point a caller can observe
/// - a caller arriving while others are queued joins the back of the queue,
///   so no waiter is overtaken and none starves while capacity exists
///
/// # Example
///
/// ```rust
/// use refill_gate::cores::PermitPool;
/// use refill_gate::PermitGate;
///
/// let pool = PermitPool::new(2).unwrap();
/// assert!(pool.try_acquire());
/// assert!(pool.try_acquire());
/// assert!(!pool.try_acquire());
/// assert_eq!(pool.available(), 0);
/// ```
pub struct PermitPool {
    /// Maximum number of permits
    limit: Uint,
    /// Available count and waiter queue, guarded together
    state: Mutex<PermitPoolState>,
}

/// A blocked acquirer and the condition variable it sleeps on.
struct Waiter {
    id: u64,
    wake: Arc<Condvar>,
}

struct PermitPoolState {
    /// Permits currently available
    available: Uint,
    /// Blocked acquirers, oldest first
    queue: VecDeque<Waiter>,
    /// Next id handed to a queued acquirer
    next_waiter: u64,
}

impl PermitPoolState {
    fn admits_newcomer(&self) -> bool {
        self.available > 0 && self.queue.is_empty()
    }

    fn admits_waiter(&self, id: u64) -> bool {
        self.available > 0 && self.queue.front().map(|w| w.id) == Some(id)
    }

    fn enqueue(&mut self) -> (u64, Arc<Condvar>) {
        let id = self.next_waiter;
        self.next_waiter = self.next_waiter.wrapping_add(1);
        let wake = Arc::new(Condvar::new());
        self.queue.push_back(Waiter {
            id,
            wake: Arc::clone(&wake),
        });
        (id, wake)
    }

    /// Wakes the queue head if there is a permit for it.
    fn wake_head(&self) {
        if self.available == 0 {
            return;
        }
        if let Some(head) = self.queue.front() {
            head.wake.notify_one();
        }
    }

    /// Takes the head's permit and passes the turn on to the next waiter.
    fn admit_head(&mut self) {
        self.queue.pop_front();
        self.available -= 1;
        self.wake_head();
    }
}

impl PermitPool {
    /// Creates a full pool holding `limit` permits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroLimit`] if `limit` is zero.
    pub fn new(limit: Uint) -> Result<Self, ConfigError> {
        if limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }

        Ok(PermitPool {
            limit,
            state: Mutex::new(PermitPoolState {
                available: limit,
                queue: VecDeque::new(),
                next_waiter: 0,
            }),
        })
    }

    /// Number of callers currently blocked in `acquire` or `acquire_timeout`.
    pub fn waiting(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Tops the pool back up to `limit` and wakes the queue head.
    ///
    /// Reading the deficit and adding it back happen under the same lock as
    /// acquisition, so a concurrent `acquire` can neither be granted twice
    /// nor push `available` past `limit`. Returns the deficit that was
    /// restored.
    pub(crate) fn restore(&self) -> Uint {
        let mut state = self.state.lock();
        let deficit = self.limit - state.available;
        if deficit == 0 {
            return 0;
        }

        state.available = self.limit;
        state.wake_head();
        tracing::debug!(deficit, waiting = state.queue.len(), "restored permits");
        deficit
    }

    /// Blocks until waiter `id` is at the head with a permit free, then takes it.
    fn wait_untimed(&self, state: &mut MutexGuard<'_, PermitPoolState>, id: u64, wake: &Condvar) {
        while !state.admits_waiter(id) {
            wake.wait(state);
        }
        state.admit_head();
    }
}

impl PermitGate for PermitPool {
    fn acquire(&self) {
        let mut state = self.state.lock();
        if state.admits_newcomer() {
            state.available -= 1;
            return;
        }

        let (id, wake) = state.enqueue();
        tracing::trace!(waiter = id, queued = state.queue.len(), "waiting for permit");
        self.wait_untimed(&mut state, id, &wake);
        tracing::trace!(waiter = id, "permit granted after wait");
    }

    fn try_acquire(&self) -> bool {
        let mut state = self.state.lock();
        if state.admits_newcomer() {
            state.available -= 1;
            true
        } else {
            false
        }
    }

    fn acquire_timeout(&self, timeout: Duration) -> AcquireResult {
        let started = Instant::now();

        let mut state = self.state.lock();
        if state.admits_newcomer() {
            state.available -= 1;
            return Ok(());
        }

        let (id, wake) = state.enqueue();
        tracing::trace!(waiter = id, ?timeout, "waiting for permit with deadline");
        let deadline = match started.checked_add(timeout) {
            Some(deadline) => deadline,
            // Deadline past what `Instant` can represent: wait without one.
            None => {
                self.wait_untimed(&mut state, id, &wake);
                return Ok(());
            }
        };

        while !state.admits_waiter(id) {
            if wake.wait_until(&mut state, deadline).timed_out() && !state.admits_waiter(id) {
                // The head is woken whenever a permit frees up, so leaving
                // never strands a successor.
                state.queue.retain(|waiter| waiter.id != id);
                return Err(AcquireError::TimedOut {
                    waited: started.elapsed(),
                });
            }
        }
        state.admit_head();
        Ok(())
    }

    fn available(&self) -> Uint {
        self.state.lock().available
    }

    fn limit(&self) -> Uint {
        self.limit
    }
}
