//! # Third-Party Delivery Quote
//!
//! The outcome of a third-party quote fetch.
//!
//! A [`DeliveryQuote`] is either a successful quote (provider id, price,
//! estimated minutes, expiry) or a failure marker with an error message.
//! Provider failure never fails the overall pricing computation; the engine
//! simply omits the quote from the result.
//!
//! # Examples
//!
//! ```
//! use delivery_pricing::domain::entities::quote::DeliveryQuote;
//! use delivery_pricing::domain::value_objects::{Money, Timestamp};
//! use rust_decimal::Decimal;
//!
//! let quote = DeliveryQuote::successful(
//!     "est-48121",
//!     Money::new(Decimal::new(55, 0)).unwrap(),
//!     32,
//!     Timestamp::now().add_secs(600),
//! );
//! assert!(quote.is_success());
//! assert!(!quote.is_expired());
//!
//! let failed = DeliveryQuote::failed("provider returned status 0");
//! assert!(!failed.is_success());
//! ```

use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A delivery quote obtained from the third-party logistics provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryQuote {
    /// Whether the provider returned a usable quote.
    success: bool,
    /// Provider-assigned quote identifier.
    provider_quote_id: Option<String>,
    /// Quoted delivery price.
    price: Option<Money>,
    /// Estimated delivery time in minutes.
    estimated_minutes: Option<u32>,
    /// Error message when the fetch failed.
    error_message: Option<String>,
    /// When this quote stops being valid.
    expires_at: Option<Timestamp>,
    /// When this quote was fetched.
    fetched_at: Timestamp,
}

impl DeliveryQuote {
    /// Creates a successful quote.
    #[must_use]
    pub fn successful(
        provider_quote_id: impl Into<String>,
        price: Money,
        estimated_minutes: u32,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            success: true,
            provider_quote_id: Some(provider_quote_id.into()),
            price: Some(price),
            estimated_minutes: Some(estimated_minutes),
            error_message: None,
            expires_at: Some(expires_at),
            fetched_at: Timestamp::now(),
        }
    }

    /// Creates a failure marker.
    #[must_use]
    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            provider_quote_id: None,
            price: None,
            estimated_minutes: None,
            error_message: Some(error_message.into()),
            expires_at: None,
            fetched_at: Timestamp::now(),
        }
    }

    /// Returns true if the provider returned a usable quote.
    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Returns true if the quote has an expiry and it has passed.
    ///
    /// Failure markers never expire; they are never presented to callers.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at.is_expired())
    }

    /// Returns the provider quote identifier.
    #[inline]
    #[must_use]
    pub fn provider_quote_id(&self) -> Option<&str> {
        self.provider_quote_id.as_deref()
    }

    /// Returns the quoted price.
    #[inline]
    #[must_use]
    pub const fn price(&self) -> Option<Money> {
        self.price
    }

    /// Returns the estimated delivery minutes.
    #[inline]
    #[must_use]
    pub const fn estimated_minutes(&self) -> Option<u32> {
        self.estimated_minutes
    }

    /// Returns the error message for failed fetches.
    #[inline]
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the expiry timestamp.
    #[inline]
    #[must_use]
    pub const fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    /// Returns when the quote was fetched.
    #[inline]
    #[must_use]
    pub const fn fetched_at(&self) -> Timestamp {
        self.fetched_at
    }
}

impl fmt::Display for DeliveryQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(
                f,
                "DeliveryQuote({} @ {} in ~{}min)",
                self.provider_quote_id.as_deref().unwrap_or("?"),
                self.price.unwrap_or_default(),
                self.estimated_minutes.unwrap_or(0),
            )
        } else {
            write!(
                f,
                "DeliveryQuote(failed: {})",
                self.error_message.as_deref().unwrap_or("unknown")
            )
        }
    }
}
