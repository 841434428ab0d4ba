//! # Pricing Result
//!
//! The final outcome of a delivery-fee computation.
//!
//! A [`PricingResult`] carries the unique quote identifier, the internal
//! expiry, the base and final fees, the derived surge multiplier, the
//! ordered breakdown of applied modifications, and the reconciled
//! third-party quote when one was obtained.

use crate::domain::entities::quote::DeliveryQuote;
use crate::domain::value_objects::ids::QuoteId;
use crate::domain::value_objects::modification::AppliedModification;
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The result of one delivery-fee computation.
///
/// # Invariants
///
/// - `quote_id` is unique per computation, never reused
/// - `expires_at` is in the future at creation time
/// - `surge_multiplier >= 1`
/// - `breakdown` preserves rule evaluation order (ascending priority)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Unique identifier for this quote.
    quote_id: QuoteId,
    /// When this quote stops being honored.
    expires_at: Timestamp,
    /// The configured base fee the computation started from.
    base_fee: Money,
    /// The final fee after all rules and caps.
    final_fee: Money,
    /// Derived multiplier: `final_fee / base_fee`, floored at 1.
    surge_multiplier: Decimal,
    /// Name of the largest positive surge contributor, if any surge applied.
    primary_surge_reason: Option<String>,
    /// Reconciled third-party quote, when one was obtained.
    courier_quote: Option<DeliveryQuote>,
    /// Ordered audit trail of every applied modification.
    breakdown: Vec<AppliedModification>,
}

impl PricingResult {
    /// Creates a pricing result.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        quote_id: QuoteId,
        expires_at: Timestamp,
        base_fee: Money,
        final_fee: Money,
        surge_multiplier: Decimal,
        primary_surge_reason: Option<String>,
        courier_quote: Option<DeliveryQuote>,
        breakdown: Vec<AppliedModification>,
    ) -> Self {
        Self {
            quote_id,
            expires_at,
            base_fee,
            final_fee,
            surge_multiplier,
            primary_surge_reason,
            courier_quote,
            breakdown,
        }
    }

    /// Returns the quote identifier.
    #[inline]
    #[must_use]
    pub const fn quote_id(&self) -> QuoteId {
        self.quote_id
    }

    /// Returns the expiry timestamp.
    #[inline]
    #[must_use]
    pub const fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Returns true once the expiry timestamp has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_expired()
    }

    /// Returns the base fee.
    #[inline]
    #[must_use]
    pub const fn base_fee(&self) -> Money {
        self.base_fee
    }

    /// Returns the final fee.
    #[inline]
    #[must_use]
    pub const fn final_fee(&self) -> Money {
        self.final_fee
    }

    /// Returns the surge multiplier.
    #[inline]
    #[must_use]
    pub const fn surge_multiplier(&self) -> Decimal {
        self.surge_multiplier
    }

    /// Returns the primary surge reason, if any surge applied.
    #[inline]
    #[must_use]
    pub fn primary_surge_reason(&self) -> Option<&str> {
        self.primary_surge_reason.as_deref()
    }

    /// Returns the third-party quote, when one was obtained.
    #[inline]
    #[must_use]
    pub const fn courier_quote(&self) -> Option<&DeliveryQuote> {
        self.courier_quote.as_ref()
    }

    /// Returns the ordered breakdown of applied modifications.
    #[inline]
    #[must_use]
    pub fn breakdown(&self) -> &[AppliedModification] {
        &self.breakdown
    }
}

impl fmt::Display for PricingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PricingResult({}: {} x{})",
            self.quote_id, self.final_fee, self.surge_multiplier
        )
    }
}
