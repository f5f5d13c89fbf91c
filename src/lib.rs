//! A blocking client-side request throttle.
//!
//! A [`RefillGate`](cores::RefillGate) caps how many outbound calls an
//! application makes per time window. Each call takes one permit; when the
//! window's permits are spent, callers block (they are never rejected) until
//! a background scheduler tops the gate back up to its limit.
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use refill_gate::cores::RefillGate;
//! use refill_gate::PermitGate;
//!
//! // At most 5 submissions per second.
//! let gate = RefillGate::new(5, Duration::from_secs(1)).unwrap();
//!
//! gate.acquire();
//! // ... perform one submission ...
//! assert_eq!(gate.available(), 4);
//! ```
//!
//! # Refill Policy
//!
//! Once per window the scheduler adds back exactly the permits consumed
//! since the previous tick. Ticks follow a fixed cadence, so a slow restore
//! does not drift the schedule. Bursts of up to twice the limit can pass
//! across a tick boundary.
//!
//! # Error Handling
//!
//! [`acquire`](PermitGate::acquire) never fails; it only delays. Errors come
//! from construction ([`ConfigError`], [`GateError`]) and from the timed
//! variant [`acquire_timeout`](PermitGate::acquire_timeout) ([`AcquireError`]).
//!
//! # Logging
//!
//! The crate emits [`tracing`] events: scheduler start and stop at `info`,
//! non-empty refills at `debug`, queueing at `trace`, and late ticks at
//! `warn`. Install a subscriber to see them.

pub mod cores;
pub mod error;
pub mod gate_config;
pub mod permit_gate;
pub mod types;

pub use error::{AcquireError, AcquireResult, ConfigError, GateError};
pub use gate_config::GateConfig;
pub use permit_gate::PermitGate;
pub use types::Uint;
