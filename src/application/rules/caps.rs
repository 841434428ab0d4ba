//! # Min/Max Cap Rule
//!
//! Final clamp of the running total into the configured fee bounds.
//!
//! Unlike the other rules this one needs the running total, so the
//! pipeline invokes [`MinMaxCapRule::apply`] directly instead of going
//! through the modification formula. The clamp is recorded in the
//! breakdown only when it changed the value.

use crate::domain::entities::rate_config::BaseFeeConfig;
use crate::domain::value_objects::modification::AppliedModification;
use crate::domain::value_objects::money::Money;
use rust_decimal::Decimal;

/// Clamps the final fee into `[minimum_fee, maximum_fee]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxCapRule;

impl MinMaxCapRule {
    /// Stable rule name.
    pub const NAME: &'static str = "min_max_cap";
    /// Runs last, after every other rule.
    pub const PRIORITY: u16 = 1000;

    /// Clamps `current_total` against the config's bounds.
    ///
    /// Returns the (possibly unchanged) total and, when the clamp changed
    /// the value, a breakdown record of the adjustment.
    #[must_use]
    pub fn apply(
        &self,
        current_total: Decimal,
        config: &BaseFeeConfig,
    ) -> (Decimal, Option<AppliedModification>) {
        let clamped = Money::saturating_from(current_total)
            .clamped(config.minimum_fee(), config.maximum_fee())
            .get();

        if clamped == current_total {
            return (current_total, None);
        }

        let description = if clamped > current_total {
            format!("raised to minimum fee {clamped}")
        } else {
            format!("capped at maximum fee {clamped}")
        };

        let record = AppliedModification::new(Self::NAME, description, clamped - current_total);
        (clamped, Some(record))
    }
}
