//! # Surge Signal Providers
//!
//! External signals (weather, demand) behind coalescing TTL caches.
//!
//! Both providers follow the same discipline: a polymorphic upstream port,
//! a per-key coalescing cache so N concurrent callers produce exactly one
//! upstream call, a bounded per-fetch timeout, and a safe default on any
//! failure. External-signal unavailability never blocks fee computation.

pub mod cache;
pub mod demand;
pub mod weather;

use thiserror::Error;

pub use cache::SignalCache;
pub use demand::{CachedDemandTracker, DemandTracker};
pub use weather::{CachedWeatherProvider, WeatherProvider};

/// Error type for signal provider operations.
///
/// Never escapes the cached adapters; every variant is folded into the
/// signal's safe default.
#[derive(Debug, Clone, Error)]
pub enum SignalError {
    /// The upstream fetch exceeded its timeout.
    #[error("signal fetch timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The upstream provider failed.
    #[error("signal provider failed: {message}")]
    Upstream {
        /// Error message.
        message: String,
    },

    /// The upstream response could not be interpreted.
    #[error("malformed signal response: {message}")]
    Malformed {
        /// Error message.
        message: String,
    },
}

impl SignalError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    /// Creates an upstream failure error.
    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Creates a malformed-response error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Result type for signal provider operations.
pub type SignalResult<T> = Result<T, SignalError>;
