//! # Courier Errors
//!
//! Error types for third-party quote provider operations.
//!
//! These errors never escape the aggregator: every failure becomes a
//! [`DeliveryQuote::failed`](crate::domain::entities::quote::DeliveryQuote::failed)
//! marker and the engine omits the quote from the result.
//!
//! # Examples
//!
//! ```
//! use delivery_pricing::infrastructure::courier::error::CourierError;
//!
//! let error = CourierError::timeout("request timed out after 3000ms");
//! assert!(error.is_retryable());
//!
//! let error = CourierError::invalid_response("missing estimate_id");
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Error type for courier provider operations.
#[derive(Debug, Clone, Error)]
pub enum CourierError {
    /// Request timed out.
    #[error("courier timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection error.
    #[error("courier connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The provider answered with an unexpected payload or status.
    #[error("courier protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// The provider answered but the response fails the success contract.
    #[error("courier invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },

    /// Internal adapter error.
    #[error("courier internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl CourierError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and a later pricing
    /// computation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Connection { .. })
    }
}

/// Result type for courier operations.
pub type CourierResult<T> = Result<T, CourierError>;
