//! Gate configuration.
//!
//! A [`GateConfig`] carries the two immutable parameters of a gate: how many
//! permits a window grants and how long a window lasts. It can be built in
//! code or deserialized, with the window written as a human-readable
//! duration:
//!
//! ```rust
//! use refill_gate::GateConfig;
//! use std::time::Duration;
//!
//! let config: GateConfig = serde_json::from_str(r#"{ "limit": 5, "window": "1s" }"#).unwrap();
//! assert_eq!(config, GateConfig::new(5, Duration::from_secs(1)));
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Uint;

/// Limit and window of a [`RefillGate`](crate::cores::RefillGate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Maximum number of permits granted per window.
    pub limit: Uint,
    /// Interval between refills.
    #[serde(with = "humantime_serde")]
    pub window: Duration,
}

impl GateConfig {
    /// Creates a configuration. Call [`validate`](Self::validate) or pass it
    /// to a gate constructor to have it checked.
    pub fn new(limit: Uint, window: Duration) -> Self {
        GateConfig { limit, window }
    }

    /// `limit` permits per second.
    pub fn per_second(limit: Uint) -> Self {
        Self::new(limit, Duration::from_secs(1))
    }

    /// `limit` permits per minute.
    pub fn per_minute(limit: Uint) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Checks that both the limit and the window are positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        if self.window.is_zero() {
            return Err(ConfigError::ZeroWindow);
        }
        Ok(())
    }
}
