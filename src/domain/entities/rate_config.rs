//! # Rate Configuration Entities
//!
//! Externally persisted rate tables, read-only to the engine.
//!
//! These entities describe how fees are computed: the active base fee with
//! optional min/max bounds, per-km distance bands, and the surge tables
//! (time windows, weather conditions, demand tiers, special days).
//!
//! # Examples
//!
//! ```
//! use delivery_pricing::domain::entities::rate_config::DistanceRate;
//! use rust_decimal::Decimal;
//!
//! // Half-open band [3, 6) at 8 per km.
//! let band = DistanceRate::new(Decimal::new(3, 0), Decimal::new(6, 0), Decimal::new(8, 0)).unwrap();
//! assert!(band.contains(Decimal::new(42, 1)));
//! assert!(!band.contains(Decimal::new(6, 0)));
//! ```

use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::weather::WeatherCondition;
use chrono::{NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for rate-configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    /// Min/max fee bounds are inverted.
    #[error("minimum fee {min} exceeds maximum fee {max}")]
    InvertedFeeBounds {
        /// Configured minimum.
        min: Money,
        /// Configured maximum.
        max: Money,
    },

    /// A distance band is empty or inverted.
    #[error("distance band [{min_km}, {max_km}) is empty or inverted")]
    EmptyDistanceBand {
        /// Lower bound in km.
        min_km: Decimal,
        /// Upper bound in km.
        max_km: Decimal,
    },

    /// A distance band has a negative bound or rate.
    #[error("distance band values must be non-negative")]
    NegativeDistanceValue,

    /// A time window does not satisfy `start < end`.
    ///
    /// Windows crossing midnight are not supported; configure two windows
    /// instead.
    #[error("time surge window must satisfy start < end (got {start}..{end})")]
    InvalidTimeWindow {
        /// Window start.
        start: NaiveTime,
        /// Window end.
        end: NaiveTime,
    },

    /// A surge amount is negative.
    #[error("surge amount must be non-negative")]
    NegativeSurgeAmount,
}

/// Result type for rate-configuration validation.
pub type ConfigValidationResult<T> = Result<T, ConfigValidationError>;

/// The active base delivery fee with optional min/max caps.
///
/// # Invariants
///
/// - At most one config is active at a time (enforced by the store)
/// - `minimum_fee <= maximum_fee` when both are present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseFeeConfig {
    /// Flat base amount every delivery starts from.
    amount: Money,
    /// Optional floor for the final fee.
    minimum_fee: Option<Money>,
    /// Optional ceiling for the final fee.
    maximum_fee: Option<Money>,
    /// Whether this config is active.
    active: bool,
}

impl BaseFeeConfig {
    /// Creates an active base fee config without caps.
    #[must_use]
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            minimum_fee: None,
            maximum_fee: None,
            active: true,
        }
    }

    /// Sets the min/max fee bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::InvertedFeeBounds`] if both bounds
    /// are present and `min > max`.
    pub fn with_bounds(
        mut self,
        minimum_fee: Option<Money>,
        maximum_fee: Option<Money>,
    ) -> ConfigValidationResult<Self> {
        if let (Some(min), Some(max)) = (minimum_fee, maximum_fee) {
            if min > max {
                return Err(ConfigValidationError::InvertedFeeBounds { min, max });
            }
        }
        self.minimum_fee = minimum_fee;
        self.maximum_fee = maximum_fee;
        Ok(self)
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns the base amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the minimum fee, if configured.
    #[inline]
    #[must_use]
    pub const fn minimum_fee(&self) -> Option<Money> {
        self.minimum_fee
    }

    /// Returns the maximum fee, if configured.
    #[inline]
    #[must_use]
    pub const fn maximum_fee(&self) -> Option<Money> {
        self.maximum_fee
    }

    /// Returns true if this config is active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// A per-km rate for a half-open distance band `[min_km, max_km)`.
///
/// Bands are evaluated first-match-wins, ordered by ascending `min_km`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceRate {
    /// Inclusive lower bound in km.
    min_km: Decimal,
    /// Exclusive upper bound in km.
    max_km: Decimal,
    /// Rate per km applied to the whole distance.
    rate_per_km: Decimal,
    /// Whether this band is active.
    active: bool,
}

impl DistanceRate {
    /// Creates an active distance band with validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::EmptyDistanceBand`] if
    /// `min_km >= max_km`, or [`ConfigValidationError::NegativeDistanceValue`]
    /// if any value is negative.
    pub fn new(
        min_km: Decimal,
        max_km: Decimal,
        rate_per_km: Decimal,
    ) -> ConfigValidationResult<Self> {
        if min_km.is_sign_negative() || max_km.is_sign_negative() || rate_per_km.is_sign_negative()
        {
            return Err(ConfigValidationError::NegativeDistanceValue);
        }
        if min_km >= max_km {
            return Err(ConfigValidationError::EmptyDistanceBand { min_km, max_km });
        }
        Ok(Self {
            min_km,
            max_km,
            rate_per_km,
            active: true,
        })
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns true if `distance_km` falls in `[min_km, max_km)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, distance_km: Decimal) -> bool {
        distance_km >= self.min_km && distance_km < self.max_km
    }

    /// Returns the inclusive lower bound.
    #[inline]
    #[must_use]
    pub const fn min_km(&self) -> Decimal {
        self.min_km
    }

    /// Returns the exclusive upper bound.
    #[inline]
    #[must_use]
    pub const fn max_km(&self) -> Decimal {
        self.max_km
    }

    /// Returns the per-km rate.
    #[inline]
    #[must_use]
    pub const fn rate_per_km(&self) -> Decimal {
        self.rate_per_km
    }

    /// Returns true if this band is active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// A time-of-day surge for one weekday.
///
/// The window is inclusive at `start`, exclusive at `end`. Windows crossing
/// midnight are rejected at construction; overlapping windows stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSurge {
    /// Day of week the window applies to.
    day: Weekday,
    /// Inclusive window start.
    start: NaiveTime,
    /// Exclusive window end.
    end: NaiveTime,
    /// Flat surge amount.
    amount: Decimal,
    /// Human-readable description for the breakdown.
    description: String,
    /// Whether this surge is active.
    active: bool,
}

impl TimeSurge {
    /// Creates an active time surge with validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::InvalidTimeWindow`] if
    /// `start >= end` (midnight-crossing windows are unsupported) or
    /// [`ConfigValidationError::NegativeSurgeAmount`] for a negative amount.
    pub fn new(
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
        amount: Decimal,
        description: impl Into<String>,
    ) -> ConfigValidationResult<Self> {
        if start >= end {
            return Err(ConfigValidationError::InvalidTimeWindow { start, end });
        }
        if amount.is_sign_negative() {
            return Err(ConfigValidationError::NegativeSurgeAmount);
        }
        Ok(Self {
            day,
            start,
            end,
            amount,
            description: description.into(),
            active: true,
        })
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns true if the weekday and time fall inside this window.
    #[must_use]
    pub fn matches(&self, day: Weekday, time: NaiveTime) -> bool {
        self.day == day && time >= self.start && time < self.end
    }

    /// Returns the surge amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns true if this surge is active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// A flat surge for a weather condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSurge {
    /// Condition the surge applies to.
    condition: WeatherCondition,
    /// Flat surge amount.
    amount: Decimal,
    /// Whether this surge is active.
    active: bool,
}

impl WeatherSurge {
    /// Creates an active weather surge.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::NegativeSurgeAmount`] for a
    /// negative amount.
    pub fn new(condition: WeatherCondition, amount: Decimal) -> ConfigValidationResult<Self> {
        if amount.is_sign_negative() {
            return Err(ConfigValidationError::NegativeSurgeAmount);
        }
        Ok(Self {
            condition,
            amount,
            active: true,
        })
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns the condition.
    #[inline]
    #[must_use]
    pub const fn condition(&self) -> WeatherCondition {
        self.condition
    }

    /// Returns the surge amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if this surge is active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// A flat surge triggered at an orders-per-hour threshold.
///
/// Tiers stack by threshold; the rule takes the steepest tier reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandSurge {
    /// Orders-per-hour threshold (inclusive).
    threshold: u32,
    /// Flat surge amount.
    amount: Decimal,
    /// Whether this surge is active.
    active: bool,
}

impl DemandSurge {
    /// Creates an active demand surge tier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::NegativeSurgeAmount`] for a
    /// negative amount.
    pub fn new(threshold: u32, amount: Decimal) -> ConfigValidationResult<Self> {
        if amount.is_sign_negative() {
            return Err(ConfigValidationError::NegativeSurgeAmount);
        }
        Ok(Self {
            threshold,
            amount,
            active: true,
        })
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns true if `orders_per_hour` meets this tier's threshold.
    #[inline]
    #[must_use]
    pub const fn is_met(&self, orders_per_hour: u32) -> bool {
        orders_per_hour >= self.threshold
    }

    /// Returns the threshold.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Returns the surge amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if this surge is active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// A flat surge for a specific calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDaySurge {
    /// Date the surge applies to.
    date: NaiveDate,
    /// Flat surge amount.
    amount: Decimal,
    /// Human-readable description for the breakdown.
    description: String,
    /// Whether this surge is active.
    active: bool,
}

impl SpecialDaySurge {
    /// Creates an active special-day surge.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::NegativeSurgeAmount`] for a
    /// negative amount.
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        description: impl Into<String>,
    ) -> ConfigValidationResult<Self> {
        if amount.is_sign_negative() {
            return Err(ConfigValidationError::NegativeSurgeAmount);
        }
        Ok(Self {
            date,
            amount,
            description: description.into(),
            active: true,
        })
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns the date.
    #[inline]
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the surge amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns true if this surge is active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}
