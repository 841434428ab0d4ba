//! # Domain Errors
//!
//! Error types for the pricing computation.
//!
//! Only structural misconfiguration is fatal to a pricing computation.
//! Per-rule failures and external-signal failures are recovered locally
//! (zero-amount skips and safe defaults) and never surface here.
//!
//! # Examples
//!
//! ```
//! use delivery_pricing::domain::errors::PricingError;
//!
//! let error = PricingError::invalid_distance("latitude 123.0 out of range");
//! assert!(!error.is_misconfiguration());
//!
//! let error = PricingError::ConfigNotFound;
//! assert!(error.is_misconfiguration());
//! ```

use thiserror::Error;

/// Error type for delivery-fee pricing operations.
///
/// Represents the fatal failure modes of a pricing computation. External
/// provider unavailability is not represented here: weather and demand
/// signals fall back to safe defaults and a missing third-party quote
/// simply degrades the result to internal pricing only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// No active base fee configuration exists. Pricing cannot proceed
    /// without a base.
    #[error("no active base fee configuration")]
    ConfigNotFound,

    /// Coordinates are out of range or the distance cannot be computed.
    #[error("invalid distance: {message}")]
    InvalidDistance {
        /// Error message.
        message: String,
    },

    /// Configuration is present but no surcharge rule is configured at all.
    ///
    /// Distinguished from "no surge applies today": an empty surcharge
    /// configuration signals misconfiguration.
    #[error("no active surcharge rules configured")]
    NoActiveRules,

    /// Unexpected internal fault during fee calculation.
    #[error("fee calculation failed: {message}")]
    CalculationFailed {
        /// Error message.
        message: String,
    },
}

impl PricingError {
    /// Creates an invalid distance error.
    #[must_use]
    pub fn invalid_distance(message: impl Into<String>) -> Self {
        Self::InvalidDistance {
            message: message.into(),
        }
    }

    /// Creates a calculation failed error.
    #[must_use]
    pub fn calculation_failed(message: impl Into<String>) -> Self {
        Self::CalculationFailed {
            message: message.into(),
        }
    }

    /// Returns true if this error signals missing or empty rate
    /// configuration rather than a bad request.
    #[must_use]
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, Self::ConfigNotFound | Self::NoActiveRules)
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, PricingError>;
