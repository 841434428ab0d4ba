//! # Pricing Rules
//!
//! The closed set of pricing rules and the registry that orders them.
//!
//! Rules form a closed tagged-variant set dispatched through a uniform
//! contract: [`PricingRule::priority`], [`PricingRule::name`],
//! [`PricingRule::applies`], and [`PricingRule::calculate`]. The
//! [`RuleRegistry`] is priority-sorted once at construction, not per
//! request; ties keep registration order.
//!
//! Evaluation itself lives in
//! [`RulePipeline`](crate::application::services::pipeline::RulePipeline).

pub mod base_fee;
pub mod caps;
pub mod distance;
pub mod promo;
pub mod surges;

use crate::domain::entities::context::PricingContext;
use crate::domain::entities::rate_config::{
    BaseFeeConfig, DemandSurge, DistanceRate, SpecialDaySurge, TimeSurge, WeatherSurge,
};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::modification::PriceModification;
use crate::domain::value_objects::weather::WeatherCondition;
use rust_decimal::Decimal;

pub use base_fee::BaseFeeRule;
pub use caps::MinMaxCapRule;
pub use distance::DistanceRule;
pub use promo::PromoRule;
pub use surges::{DemandSurgeRule, SpecialDayRule, TimeSurgeRule, WeatherSurgeRule};

/// The active rate configuration read once per request.
///
/// Distance bands are kept sorted ascending by `min_km` so the distance
/// rule's first-match semantics are deterministic.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    base_fee: BaseFeeConfig,
    distance_rates: Vec<DistanceRate>,
    time_surges: Vec<TimeSurge>,
    weather_surges: Vec<WeatherSurge>,
    demand_surges: Vec<DemandSurge>,
    special_day: Option<SpecialDaySurge>,
}

impl RateSnapshot {
    /// Creates a snapshot, sorting distance bands ascending by `min_km`.
    #[must_use]
    pub fn new(
        base_fee: BaseFeeConfig,
        mut distance_rates: Vec<DistanceRate>,
        time_surges: Vec<TimeSurge>,
        weather_surges: Vec<WeatherSurge>,
        demand_surges: Vec<DemandSurge>,
        special_day: Option<SpecialDaySurge>,
    ) -> Self {
        distance_rates.sort_by_key(DistanceRate::min_km);
        Self {
            base_fee,
            distance_rates,
            time_surges,
            weather_surges,
            demand_surges,
            special_day,
        }
    }

    /// Returns the active base fee configuration.
    #[inline]
    #[must_use]
    pub const fn base_fee(&self) -> &BaseFeeConfig {
        &self.base_fee
    }

    /// Returns the distance bands, sorted ascending by `min_km`.
    #[inline]
    #[must_use]
    pub fn distance_rates(&self) -> &[DistanceRate] {
        &self.distance_rates
    }

    /// Returns the time surge windows.
    #[inline]
    #[must_use]
    pub fn time_surges(&self) -> &[TimeSurge] {
        &self.time_surges
    }

    /// Returns the weather surges.
    #[inline]
    #[must_use]
    pub fn weather_surges(&self) -> &[WeatherSurge] {
        &self.weather_surges
    }

    /// Returns the demand surge tiers.
    #[inline]
    #[must_use]
    pub fn demand_surges(&self) -> &[DemandSurge] {
        &self.demand_surges
    }

    /// Returns the special-day surge for the evaluation date, if configured.
    #[inline]
    #[must_use]
    pub const fn special_day(&self) -> Option<&SpecialDaySurge> {
        self.special_day.as_ref()
    }

    /// Returns true if any surcharge rule is configured at all.
    ///
    /// Distinguishes an empty surcharge configuration (misconfiguration,
    /// fatal) from "no surge applies today". Special-day and promo
    /// configuration are keyed lookups and are not counted.
    #[must_use]
    pub fn has_surcharge_rules(&self) -> bool {
        !self.distance_rates.is_empty()
            || !self.time_surges.is_empty()
            || !self.weather_surges.is_empty()
            || !self.demand_surges.is_empty()
    }
}

/// Everything a rule may read during evaluation.
///
/// Immutable; rules never write. The distance and the external signals are
/// resolved by the engine before the pipeline runs.
#[derive(Debug, Clone, Copy)]
pub struct RuleInputs<'a> {
    /// The caller-supplied pricing context.
    pub context: &'a PricingContext,
    /// Haversine pickup-to-drop distance in km, rounded to 3 decimals.
    pub distance_km: Decimal,
    /// Fetched weather condition (safe default: clear).
    pub weather: WeatherCondition,
    /// Fetched demand metric in orders per hour (safe default: 0).
    pub orders_per_hour: u32,
    /// The rate configuration snapshot for this request.
    pub rates: &'a RateSnapshot,
}

/// The closed set of pricing rules.
///
/// Dispatched through a uniform function table; adding a rule means adding
/// a variant here, so the full rule population is visible at a glance.
#[derive(Debug, Clone)]
pub enum PricingRule {
    /// Seeds the running total with the configured base fee.
    BaseFee(BaseFeeRule),
    /// Per-km charge from the first matching distance band.
    Distance(DistanceRule),
    /// Sum of all matching time-of-day surge windows.
    TimeSurge(TimeSurgeRule),
    /// Flat surcharge for the fetched weather condition.
    WeatherSurge(WeatherSurgeRule),
    /// Steepest satisfied demand tier.
    DemandSurge(DemandSurgeRule),
    /// Flat surcharge on configured calendar dates.
    SpecialDay(SpecialDayRule),
    /// Percentage discount for a recognized promo code.
    Promo(PromoRule),
    /// Final clamp of the running total into the configured fee bounds.
    MinMaxCap(MinMaxCapRule),
}

impl PricingRule {
    /// Returns the rule's priority; lower runs earlier.
    #[must_use]
    pub const fn priority(&self) -> u16 {
        match self {
            Self::BaseFee(_) => BaseFeeRule::PRIORITY,
            Self::Distance(_) => DistanceRule::PRIORITY,
            Self::TimeSurge(_) => TimeSurgeRule::PRIORITY,
            Self::WeatherSurge(_) => WeatherSurgeRule::PRIORITY,
            Self::DemandSurge(_) => DemandSurgeRule::PRIORITY,
            Self::SpecialDay(_) => SpecialDayRule::PRIORITY,
            Self::Promo(_) => PromoRule::PRIORITY,
            Self::MinMaxCap(_) => MinMaxCapRule::PRIORITY,
        }
    }

    /// Returns the rule's stable name, used in breakdown entries.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BaseFee(_) => BaseFeeRule::NAME,
            Self::Distance(_) => DistanceRule::NAME,
            Self::TimeSurge(_) => TimeSurgeRule::NAME,
            Self::WeatherSurge(_) => WeatherSurgeRule::NAME,
            Self::DemandSurge(_) => DemandSurgeRule::NAME,
            Self::SpecialDay(_) => SpecialDayRule::NAME,
            Self::Promo(_) => PromoRule::NAME,
            Self::MinMaxCap(_) => MinMaxCapRule::NAME,
        }
    }

    /// Returns true if the rule has something to say for these inputs.
    ///
    /// A false here means "skip with no breakdown record".
    #[must_use]
    pub fn applies(&self, inputs: &RuleInputs<'_>) -> bool {
        match self {
            Self::BaseFee(rule) => rule.applies(inputs),
            Self::Distance(rule) => rule.applies(inputs),
            Self::TimeSurge(rule) => rule.applies(inputs),
            Self::WeatherSurge(rule) => rule.applies(inputs),
            Self::DemandSurge(rule) => rule.applies(inputs),
            Self::SpecialDay(rule) => rule.applies(inputs),
            Self::Promo(rule) => rule.applies(inputs),
            // The cap always runs; whether it records anything depends on
            // the running total, which only the pipeline sees.
            Self::MinMaxCap(_) => true,
        }
    }

    /// Computes the rule's modification for these inputs.
    ///
    /// `Ok(None)` means the rule had nothing to contribute after all; the
    /// pipeline records a zero-amount skip. The cap variant contributes
    /// through [`MinMaxCapRule::apply`] instead and returns `Ok(None)` here.
    ///
    /// # Errors
    ///
    /// Returns a domain error on arithmetic failure; the pipeline isolates
    /// it as a zero-amount skip.
    pub fn calculate(&self, inputs: &RuleInputs<'_>) -> DomainResult<Option<PriceModification>> {
        match self {
            Self::BaseFee(rule) => rule.calculate(inputs),
            Self::Distance(rule) => rule.calculate(inputs),
            Self::TimeSurge(rule) => rule.calculate(inputs),
            Self::WeatherSurge(rule) => rule.calculate(inputs),
            Self::DemandSurge(rule) => rule.calculate(inputs),
            Self::SpecialDay(rule) => rule.calculate(inputs),
            Self::Promo(rule) => rule.calculate(inputs),
            Self::MinMaxCap(_) => Ok(None),
        }
    }
}

#[derive(Debug, Clone)]
struct RegisteredRule {
    rule: PricingRule,
    enabled: bool,
}

/// Priority-ordered collection of pricing rules.
///
/// Sorted once at construction (stable; ties keep registration order) so
/// per-request evaluation never re-sorts.
///
/// # Examples
///
/// ```
/// use delivery_pricing::application::rules::RuleRegistry;
///
/// let registry = RuleRegistry::standard();
/// assert_eq!(registry.len(), 8);
///
/// let names: Vec<&str> = registry.enabled_rules().map(|r| r.name()).collect();
/// assert_eq!(names.first(), Some(&"base_fee"));
/// assert_eq!(names.last(), Some(&"min_max_cap"));
/// ```
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    entries: Vec<RegisteredRule>,
}

impl RuleRegistry {
    /// Creates a registry from an explicit rule list.
    ///
    /// All rules start enabled. The list is stably sorted by ascending
    /// priority; ties keep the given order.
    #[must_use]
    pub fn new(rules: Vec<PricingRule>) -> Self {
        let mut entries: Vec<RegisteredRule> = rules
            .into_iter()
            .map(|rule| RegisteredRule {
                rule,
                enabled: true,
            })
            .collect();
        entries.sort_by_key(|entry| entry.rule.priority());
        Self { entries }
    }

    /// Creates the standard rule population with no promotions configured.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            PricingRule::BaseFee(BaseFeeRule),
            PricingRule::Distance(DistanceRule),
            PricingRule::TimeSurge(TimeSurgeRule),
            PricingRule::WeatherSurge(WeatherSurgeRule),
            PricingRule::DemandSurge(DemandSurgeRule),
            PricingRule::SpecialDay(SpecialDayRule),
            PricingRule::Promo(PromoRule::default()),
            PricingRule::MinMaxCap(MinMaxCapRule),
        ])
    }

    /// Creates the standard rule population with a promo table.
    #[must_use]
    pub fn standard_with_promotions(promo: PromoRule) -> Self {
        Self::new(vec![
            PricingRule::BaseFee(BaseFeeRule),
            PricingRule::Distance(DistanceRule),
            PricingRule::TimeSurge(TimeSurgeRule),
            PricingRule::WeatherSurge(WeatherSurgeRule),
            PricingRule::DemandSurge(DemandSurgeRule),
            PricingRule::SpecialDay(SpecialDayRule),
            PricingRule::Promo(promo),
            PricingRule::MinMaxCap(MinMaxCapRule),
        ])
    }

    /// Disables the named rule, if present.
    #[must_use]
    pub fn with_rule_disabled(mut self, name: &str) -> Self {
        for entry in &mut self.entries {
            if entry.rule.name() == name {
                entry.enabled = false;
            }
        }
        self
    }

    /// Iterates enabled rules in ascending priority order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &PricingRule> {
        self.entries
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| &entry.rule)
    }

    /// Returns the total number of registered rules, enabled or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_is_priority_ordered() {
        let registry = RuleRegistry::standard();
        let priorities: Vec<u16> = registry.enabled_rules().map(PricingRule::priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn base_fee_first_cap_last() {
        let registry = RuleRegistry::standard();
        let names: Vec<&str> = registry.enabled_rules().map(PricingRule::name).collect();
        assert_eq!(names.first(), Some(&BaseFeeRule::NAME));
        assert_eq!(names.last(), Some(&MinMaxCapRule::NAME));
    }

    #[test]
    fn sort_is_stable_for_ties() {
        // Two promo rules share a priority; registration order must hold.
        let first = PromoRule::single("A", rust_decimal::Decimal::new(5, 0));
        let second = PromoRule::single("B", rust_decimal::Decimal::new(10, 0));
        let registry = RuleRegistry::new(vec![
            PricingRule::Promo(first),
            PricingRule::Promo(second),
        ]);

        let rules: Vec<&PricingRule> = registry.enabled_rules().collect();
        assert_eq!(rules.len(), 2);
        match rules.first() {
            Some(PricingRule::Promo(rule)) => assert!(rule.recognizes("A")),
            other => unreachable!("expected promo rule, got {other:?}"),
        }
    }

    #[test]
    fn disabling_removes_from_iteration() {
        let registry = RuleRegistry::standard().with_rule_disabled(WeatherSurgeRule::NAME);
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.enabled_rules().count(), 7);
        assert!(
            registry
                .enabled_rules()
                .all(|rule| rule.name() != WeatherSurgeRule::NAME)
        );
    }

    #[test]
    fn snapshot_sorts_distance_bands() {
        use crate::domain::entities::rate_config::{BaseFeeConfig, DistanceRate};
        use crate::domain::value_objects::money::Money;
        use rust_decimal::Decimal;

        let snapshot = RateSnapshot::new(
            BaseFeeConfig::new(Money::new(Decimal::new(30, 0)).unwrap()),
            vec![
                DistanceRate::new(Decimal::new(6, 0), Decimal::new(12, 0), Decimal::new(10, 0))
                    .unwrap(),
                DistanceRate::new(Decimal::ZERO, Decimal::new(3, 0), Decimal::new(5, 0)).unwrap(),
                DistanceRate::new(Decimal::new(3, 0), Decimal::new(6, 0), Decimal::new(8, 0))
                    .unwrap(),
            ],
            vec![],
            vec![],
            vec![],
            None,
        );

        let mins: Vec<Decimal> = snapshot
            .distance_rates()
            .iter()
            .map(DistanceRate::min_km)
            .collect();
        assert_eq!(
            mins,
            vec![Decimal::ZERO, Decimal::new(3, 0), Decimal::new(6, 0)]
        );
    }

    #[test]
    fn empty_surcharge_config_is_detected() {
        use crate::domain::entities::rate_config::BaseFeeConfig;
        use crate::domain::value_objects::money::Money;
        use rust_decimal::Decimal;

        let empty = RateSnapshot::new(
            BaseFeeConfig::new(Money::new(Decimal::new(30, 0)).unwrap()),
            vec![],
            vec![],
            vec![],
            vec![],
            None,
        );
        assert!(!empty.has_surcharge_rules());
    }
}
