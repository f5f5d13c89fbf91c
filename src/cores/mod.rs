//! Permit gate implementations.
//!
//! - **[`PermitPool`]** - bounded pool of permits with a FIFO queue of blocked
//!   acquirers; on its own it is a one-shot budget that never replenishes
//! - **[`RefillGate`]** - a `PermitPool` paired with a background scheduler
//!   that restores it to full once per window
//!
//! # Thread Safety
//!
//! The available count and the waiter queue sit behind a single mutex. The
//! scheduler's restore takes the same lock as `acquire`, so the count stays
//! within `0..=limit` under any interleaving.

pub mod permit_pool;
pub use permit_pool::PermitPool;

pub mod refill_gate;
pub use refill_gate::RefillGate;

mod refill_scheduler;
