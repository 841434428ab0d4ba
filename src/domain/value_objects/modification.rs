//! # Price Modifications
//!
//! The fee-adjustment algebra applied by pricing rules.
//!
//! A rule produces a [`PriceModification`] (a formula: flat amount,
//! percentage of the running total, or multiplier). The pipeline realizes
//! it into a monetary delta against the running total and records an
//! [`AppliedModification`] in the result breakdown.
//!
//! # Examples
//!
//! ```
//! use delivery_pricing::domain::value_objects::modification::{
//!     ModificationKind, PriceModification,
//! };
//! use rust_decimal::Decimal;
//!
//! let surge = PriceModification::multiplier("demand_surge", "peak demand", Decimal::new(15, 1), 40);
//!
//! // A 1.5x multiplier adds half of the current running total.
//! let delta = surge.delta(Decimal::new(60, 0)).unwrap();
//! assert_eq!(delta, Decimal::new(30, 0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a modification amount is interpreted against the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModificationKind {
    /// The amount is added as-is.
    Flat,
    /// The amount is a percentage of the current running total.
    Percentage,
    /// The amount is a factor; a 1.5x multiplier adds 0.5x of the total.
    Multiplier,
}

impl fmt::Display for ModificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "FLAT"),
            Self::Percentage => write!(f, "PERCENTAGE"),
            Self::Multiplier => write!(f, "MULTIPLIER"),
        }
    }
}

/// A fee modification produced by a pricing rule.
///
/// Pure value type; `delta` computes the monetary change without mutating
/// anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceModification {
    /// Name of the rule that produced this modification.
    rule_name: String,
    /// Human-readable description for the breakdown.
    description: String,
    /// Signed amount; interpretation depends on `kind`.
    amount: Decimal,
    /// How `amount` is applied.
    kind: ModificationKind,
    /// Priority of the producing rule, kept for audit ordering.
    priority: u16,
}

impl PriceModification {
    /// Creates a modification.
    #[must_use]
    pub fn new(
        rule_name: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        kind: ModificationKind,
        priority: u16,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            description: description.into(),
            amount,
            kind,
            priority,
        }
    }

    /// Creates a flat modification.
    #[must_use]
    pub fn flat(
        rule_name: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        priority: u16,
    ) -> Self {
        Self::new(rule_name, description, amount, ModificationKind::Flat, priority)
    }

    /// Creates a percentage modification.
    #[must_use]
    pub fn percentage(
        rule_name: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        priority: u16,
    ) -> Self {
        Self::new(
            rule_name,
            description,
            amount,
            ModificationKind::Percentage,
            priority,
        )
    }

    /// Creates a multiplier modification.
    #[must_use]
    pub fn multiplier(
        rule_name: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        priority: u16,
    ) -> Self {
        Self::new(
            rule_name,
            description,
            amount,
            ModificationKind::Multiplier,
            priority,
        )
    }

    /// Computes the monetary delta this modification adds to the running
    /// total.
    ///
    /// - Flat: the amount itself
    /// - Percentage: `total × amount / 100`
    /// - Multiplier: `total × (amount − 1)`
    ///
    /// Returns `None` on arithmetic overflow; the pipeline treats that as a
    /// per-rule failure and records a zero-amount skip.
    #[must_use]
    pub fn delta(&self, current_total: Decimal) -> Option<Decimal> {
        match self.kind {
            ModificationKind::Flat => Some(self.amount),
            ModificationKind::Percentage => current_total
                .checked_mul(self.amount)?
                .checked_div(Decimal::ONE_HUNDRED),
            ModificationKind::Multiplier => {
                let factor = self.amount.checked_sub(Decimal::ONE)?;
                current_total.checked_mul(factor)
            }
        }
    }

    /// Returns the producing rule's name.
    #[inline]
    #[must_use]
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the raw amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the modification kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ModificationKind {
        self.kind
    }

    /// Returns the producing rule's priority.
    #[inline]
    #[must_use]
    pub const fn priority(&self) -> u16 {
        self.priority
    }
}

/// The audit record of a modification after it was applied.
///
/// Distinct from [`PriceModification`]: this carries the realized monetary
/// amount, not the formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedModification {
    /// Name of the rule that was applied.
    rule_name: String,
    /// Human-readable description.
    description: String,
    /// Realized signed amount added to the running total.
    amount: Decimal,
}

impl AppliedModification {
    /// Creates an applied-modification record.
    #[must_use]
    pub fn new(
        rule_name: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            description: description.into(),
            amount,
        }
    }

    /// Creates a zero-amount record for a rule that applied but failed or
    /// produced nothing.
    #[must_use]
    pub fn skipped(rule_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(rule_name, description, Decimal::ZERO)
    }

    /// Returns the rule name.
    #[inline]
    #[must_use]
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the realized amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for AppliedModification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:+}", self.rule_name, self.amount)
    }
}
