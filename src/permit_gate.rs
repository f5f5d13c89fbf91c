//! Core trait for permit gates.
//!
//! This module defines the capability shared by the bare [`PermitPool`] and
//! the self-refilling [`RefillGate`]. Callers that only need admission
//! control can hold a `dyn PermitGate` and stay agnostic of how capacity is
//! replenished.
//!
//! [`PermitPool`]: crate::cores::PermitPool
//! [`RefillGate`]: crate::cores::RefillGate

use std::time::Duration;

use crate::error::AcquireResult;
use crate::types::Uint;

/// Admission control: one permit authorizes exactly one outbound call.
pub trait PermitGate: Send + Sync {
    /// Blocks the calling thread until a permit is granted, then consumes it.
    ///
    /// Never fails and never times out. Waiters are admitted in arrival order.
    fn acquire(&self);

    /// Takes a permit only if one is free right now and no caller is queued
    /// ahead. Returns whether a permit was taken.
    fn try_acquire(&self) -> bool;

    /// Like [`acquire`](Self::acquire), but gives up after `timeout`.
    ///
    /// # Returns
    /// * `Ok(())` if a permit was granted
    /// * `Err(AcquireError::TimedOut)` if the deadline passed first; no
    ///   permit is consumed and the caller leaves the queue
    fn acquire_timeout(&self, timeout: Duration) -> AcquireResult;

    /// Number of permits currently available.
    fn available(&self) -> Uint;

    /// Configured maximum number of permits per window.
    fn limit(&self) -> Uint;

    /// Acquires one permit, then runs `call`.
    ///
    /// ```rust
    /// use refill_gate::{GateConfig, PermitGate};
    /// use refill_gate::cores::RefillGate;
    ///
    /// let gate = RefillGate::from_config(&GateConfig::per_second(5)).unwrap();
    /// let status = gate.throttle(|| 200);
    /// assert_eq!(status, 200);
    /// assert_eq!(gate.available(), 4);
    /// ```
    fn throttle<T, F>(&self, call: F) -> T
    where
        Self: Sized,
        F: FnOnce() -> T,
    {
        self.acquire();
        call()
    }
}
