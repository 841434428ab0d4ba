//! # Money Value Object
//!
//! Non-negative monetary amount with checked arithmetic.
//!
//! A single monetary unit is assumed throughout the engine; [`Money`] wraps
//! `rust_decimal::Decimal` and rejects negative amounts at construction.
//!
//! # Examples
//!
//! ```
//! use delivery_pricing::domain::value_objects::money::Money;
//! use rust_decimal::Decimal;
//!
//! let base = Money::new(Decimal::new(30, 0)).unwrap();
//! let surcharge = Money::new(Decimal::new(336, 1)).unwrap();
//!
//! let total = base.checked_add(&surcharge).unwrap();
//! assert_eq!(total.get(), Decimal::new(636, 1));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for monetary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MoneyError {
    /// A negative amount was supplied where only non-negative is valid.
    #[error("monetary amount cannot be negative")]
    Negative,

    /// Arithmetic operation overflowed.
    #[error("monetary arithmetic overflow")]
    Overflow,
}

/// Result type for monetary operations.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// A non-negative monetary amount.
///
/// # Invariants
///
/// - Never negative
/// - All arithmetic is checked; overflow is an error, never a wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a monetary amount, rejecting negative values.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if `value` is below zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use delivery_pricing::domain::value_objects::money::{Money, MoneyError};
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Money::new(Decimal::new(100, 0)).is_ok());
    /// assert_eq!(Money::new(Decimal::new(-1, 0)), Err(MoneyError::Negative));
    /// ```
    pub fn new(value: Decimal) -> MoneyResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::Negative);
        }
        Ok(Self(value))
    }

    /// Creates a zero amount.
    #[must_use]
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Creates a monetary amount from a signed decimal, flooring at zero.
    ///
    /// Used where a running total may have been driven below zero by
    /// discounts and the policy is "a fee is never negative".
    #[must_use]
    pub fn saturating_from(value: Decimal) -> Self {
        Self(value.max(Decimal::ZERO))
    }

    /// Returns the underlying decimal value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds two amounts with overflow checking.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the sum cannot be represented.
    pub fn checked_add(&self, other: &Self) -> MoneyResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Clamps the amount into `[min, max]`, either bound optional.
    ///
    /// # Examples
    ///
    /// ```
    /// use delivery_pricing::domain::value_objects::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let fee = Money::new(Decimal::new(150, 0)).unwrap();
    /// let max = Money::new(Decimal::new(120, 0)).unwrap();
    ///
    /// assert_eq!(fee.clamped(None, Some(max)), max);
    /// ```
    #[must_use]
    pub fn clamped(&self, min: Option<Self>, max: Option<Self>) -> Self {
        let mut value = self.0;
        if let Some(lower) = min {
            value = value.max(lower.0);
        }
        if let Some(upper) = max {
            value = value.min(upper.0);
        }
        Self(value)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}
