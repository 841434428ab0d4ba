//! # Promo Rule
//!
//! Percentage discount for a recognized promo code.
//!
//! The code-to-percentage table is supplied at registry construction; the
//! read-only rate store stays untouched. The discount is expressed as a
//! negative percentage of the running total, so it lands after all surges
//! and before the min/max cap.

use crate::application::rules::RuleInputs;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::modification::PriceModification;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Percentage-off promotion keyed by promo code.
#[derive(Debug, Clone, Default)]
pub struct PromoRule {
    /// Promo code to percent-off (e.g. 10 means 10% off the running total).
    discounts: HashMap<String, Decimal>,
}

impl PromoRule {
    /// Stable rule name.
    pub const NAME: &'static str = "promo";
    /// Runs after all surges, before the cap.
    pub const PRIORITY: u16 = 60;

    /// Creates a promo rule from a code-to-percentage table.
    ///
    /// Percentages are interpreted as "percent off"; negative or
    /// above-100 entries are clamped into `[0, 100]`.
    #[must_use]
    pub fn new(discounts: HashMap<String, Decimal>) -> Self {
        let discounts = discounts
            .into_iter()
            .map(|(code, pct)| (code, pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)))
            .collect();
        Self { discounts }
    }

    /// Creates a promo rule with a single code.
    #[must_use]
    pub fn single(code: impl Into<String>, percent_off: Decimal) -> Self {
        let mut discounts = HashMap::new();
        discounts.insert(code.into(), percent_off);
        Self::new(discounts)
    }

    /// Returns true if the code has a configured discount.
    #[must_use]
    pub fn recognizes(&self, code: &str) -> bool {
        self.discounts.contains_key(code)
    }

    /// Applies when the context carries a recognized promo code.
    #[must_use]
    pub fn applies(&self, inputs: &RuleInputs<'_>) -> bool {
        inputs
            .context
            .promo_code()
            .is_some_and(|code| self.recognizes(code))
    }

    /// Emits a negative percentage modification for the matched code.
    ///
    /// # Errors
    ///
    /// Infallible in practice; typed for the uniform rule contract.
    pub fn calculate(&self, inputs: &RuleInputs<'_>) -> DomainResult<Option<PriceModification>> {
        let Some((code, percent)) = inputs
            .context
            .promo_code()
            .and_then(|code| self.discounts.get_key_value(code))
        else {
            return Ok(None);
        };

        Ok(Some(PriceModification::percentage(
            Self::NAME,
            format!("promo {code} ({percent}% off)"),
            -*percent,
            Self::PRIORITY,
        )))
    }
}
