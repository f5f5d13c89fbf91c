//! Unsigned integer type alias for permit counts.
//!
//! `Uint` is used for the configured limit, the available count and every
//! deficit computed by the scheduler. The concrete type is chosen at compile
//! time via feature flags.
//!
//! # Features
//! - `permits-u64` (default): uses [`u64`] as `Uint`
//! - `permits-u32`: uses [`u32`] as `Uint`
//!   (Both features cannot be enabled at the same time.)
//! - If neither feature is enabled, `u64` is used.

#[cfg(all(feature = "permits-u64", feature = "permits-u32"))]
compile_error!("You cannot enable both `permits-u64` and `permits-u32` features at the same time");

/// Alias for the unsigned integer type used for permit counts.
#[cfg(all(feature = "permits-u32", not(feature = "permits-u64")))]
pub type Uint = u32;

/// Alias for the unsigned integer type used for permit counts.
#[cfg(not(all(feature = "permits-u32", not(feature = "permits-u64"))))]
pub type Uint = u64;
