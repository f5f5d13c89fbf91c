//! error.rs
//! Configuration and timed-acquire error types.
//!
//! Plain [`acquire`](crate::PermitGate::acquire) has no error type: it can
//! only delay. Errors exist at construction time and for the timed variant.

use std::time::Duration;

/// Rejected gate configuration. Nothing is started when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A zero limit would make every acquire block forever.
    #[error("invalid gate configuration: limit must be greater than 0")]
    ZeroLimit,
    /// A zero window leaves the refill timer without a period.
    #[error("invalid gate configuration: window must be greater than 0")]
    ZeroWindow,
}

/// Failure of [`acquire_timeout`](crate::PermitGate::acquire_timeout).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcquireError {
    /// No permit was granted before the deadline. No permit was consumed.
    #[error("no permit granted within {waited:?}")]
    TimedOut { waited: Duration },
}

/// Result type for timed acquisition.
pub type AcquireResult = Result<(), AcquireError>;

/// Failure to build a [`RefillGate`](crate::cores::RefillGate).
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The limit or window was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The operating system refused to start the refill thread.
    #[error("failed to start refill scheduler thread")]
    Spawn(#[source] std::io::Error),
}
