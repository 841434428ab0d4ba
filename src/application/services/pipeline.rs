//! # Rule Evaluation Pipeline
//!
//! Sequential evaluation of the priority-ordered rule registry.
//!
//! Evaluation is strictly sequential: percentage and multiplier
//! modifications depend on the running total produced by earlier rules, so
//! parallelizing would change numeric results. Per-rule failures are
//! isolated: a rule that errors or produces nothing is recorded as a
//! zero-amount skip and evaluation continues. Only the registry being
//! structurally unable to price (no base, handled upstream) is fatal.

use crate::application::rules::{PricingRule, RuleInputs, RuleRegistry};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::modification::AppliedModification;
use crate::domain::value_objects::money::Money;
use rust_decimal::Decimal;

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The configured base fee the run started from.
    pub base_fee: Money,
    /// The final fee after all rules and caps.
    pub final_fee: Money,
    /// `final_fee / base_fee`, floored at 1 (1 when the base is zero).
    pub surge_multiplier: Decimal,
    /// Name of the single largest positive contributor, excluding the base
    /// fee and the cap. None when no surge applied.
    pub primary_surge_reason: Option<String>,
    /// Ordered audit trail, one entry per applied (or skipped) rule.
    pub breakdown: Vec<AppliedModification>,
    /// Rules whose `applies` returned false.
    pub rules_not_applicable: usize,
    /// Rules recorded as zero-amount skips after a failure.
    pub rules_isolated: usize,
}

/// Evaluates the rule registry over a set of inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RulePipeline;

impl RulePipeline {
    /// Runs every enabled rule in priority order over the running total.
    ///
    /// The running total never drops below zero: a discount larger than the
    /// accumulated fee is truncated at application time.
    ///
    /// # Errors
    ///
    /// Infallible at this level in practice; per-rule failures are isolated
    /// into zero-amount breakdown entries. Typed for symmetry with the
    /// engine's other fallible stages.
    pub fn evaluate(
        registry: &RuleRegistry,
        inputs: &RuleInputs<'_>,
    ) -> DomainResult<PipelineOutcome> {
        let mut total = Decimal::ZERO;
        let mut breakdown = Vec::new();
        let mut rules_not_applicable = 0usize;
        let mut rules_isolated = 0usize;

        for rule in registry.enabled_rules() {
            if let PricingRule::MinMaxCap(cap) = rule {
                let (clamped, record) = cap.apply(total, inputs.rates.base_fee());
                total = clamped;
                if let Some(record) = record {
                    tracing::debug!(rule = rule.name(), amount = %record.amount(), "fee clamped");
                    breakdown.push(record);
                }
                continue;
            }

            if !rule.applies(inputs) {
                rules_not_applicable += 1;
                continue;
            }

            match rule.calculate(inputs) {
                Ok(Some(modification)) => match modification.delta(total) {
                    Some(delta) => {
                        total = total.saturating_add(delta).max(Decimal::ZERO);
                        breakdown.push(AppliedModification::new(
                            modification.rule_name(),
                            modification.description(),
                            delta,
                        ));
                    }
                    None => {
                        rules_isolated += 1;
                        tracing::warn!(rule = rule.name(), "modification overflowed, skipping");
                        breakdown.push(AppliedModification::skipped(
                            rule.name(),
                            "skipped: arithmetic overflow",
                        ));
                    }
                },
                Ok(None) => {
                    rules_isolated += 1;
                    breakdown.push(AppliedModification::skipped(
                        rule.name(),
                        "skipped: no modification produced",
                    ));
                }
                Err(error) => {
                    rules_isolated += 1;
                    tracing::warn!(rule = rule.name(), error = %error, "rule failed, skipping");
                    breakdown.push(AppliedModification::skipped(
                        rule.name(),
                        format!("skipped: {error}"),
                    ));
                }
            }
        }

        let base_fee = inputs.rates.base_fee().amount();
        let final_fee = Money::saturating_from(total);
        let surge_multiplier = derive_multiplier(final_fee.get(), base_fee.get());
        let primary_surge_reason = primary_surge_reason(&breakdown);

        Ok(PipelineOutcome {
            base_fee,
            final_fee,
            surge_multiplier,
            primary_surge_reason,
            breakdown,
            rules_not_applicable,
            rules_isolated,
        })
    }
}

/// `total / base`, floored at 1; defined as 1 when the base is zero.
fn derive_multiplier(total: Decimal, base: Decimal) -> Decimal {
    if base.is_zero() {
        return Decimal::ONE;
    }
    total
        .checked_div(base)
        .map_or(Decimal::ONE, |m| m.max(Decimal::ONE))
}

/// Name of the single largest positive contribution, excluding the base fee
/// and the cap. First entry wins ties so the result is deterministic.
fn primary_surge_reason(breakdown: &[AppliedModification]) -> Option<String> {
    let mut best: Option<&AppliedModification> = None;
    for entry in breakdown {
        if entry.rule_name() == crate::application::rules::BaseFeeRule::NAME
            || entry.rule_name() == crate::application::rules::MinMaxCapRule::NAME
        {
            continue;
        }
        if entry.amount() <= Decimal::ZERO {
            continue;
        }
        if best.is_none_or(|current| entry.amount() > current.amount()) {
            best = Some(entry);
        }
    }
    best.map(|entry| entry.rule_name().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::rules::test_support::{context, context_at, context_with_promo};
    use crate::application::rules::{PromoRule, RateSnapshot, RuleRegistry};
    use crate::domain::entities::rate_config::{
        BaseFeeConfig, DemandSurge, DistanceRate, TimeSurge, WeatherSurge,
    };
    use crate::domain::value_objects::money::Money;
    use crate::domain::value_objects::timestamp::Timestamp;
    use crate::domain::value_objects::weather::WeatherCondition;
    use chrono::{NaiveTime, Weekday};

    fn money(value: i64) -> Money {
        Money::new(Decimal::new(value, 0)).unwrap()
    }

    fn base_with_bounds(amount: i64, min: i64, max: i64) -> BaseFeeConfig {
        BaseFeeConfig::new(money(amount))
            .with_bounds(Some(money(min)), Some(money(max)))
            .unwrap()
    }

    fn band(min: i64, max: i64, rate: i64) -> DistanceRate {
        DistanceRate::new(
            Decimal::new(min, 0),
            Decimal::new(max, 0),
            Decimal::new(rate, 0),
        )
        .unwrap()
    }

    fn inputs<'a>(
        context: &'a crate::domain::entities::context::PricingContext,
        rates: &'a RateSnapshot,
        distance_km: Decimal,
    ) -> RuleInputs<'a> {
        RuleInputs {
            context,
            distance_km,
            weather: WeatherCondition::Clear,
            orders_per_hour: 0,
            rates,
        }
    }

    #[test]
    fn base_30_with_4_2_km_in_8_per_km_band() {
        // Base 30, 4.2 km in [3, 6) at 8/km, no surges:
        // final = 63.6, multiplier = 2.12.
        let snapshot = RateSnapshot::new(
            BaseFeeConfig::new(money(30)),
            vec![band(0, 3, 5), band(3, 6, 8)],
            vec![],
            vec![],
            vec![],
            None,
        );
        let context = context();
        let inputs = inputs(&context, &snapshot, Decimal::new(42, 1));

        let outcome = RulePipeline::evaluate(&RuleRegistry::standard(), &inputs).unwrap();

        assert_eq!(outcome.final_fee.get(), Decimal::new(636, 1));
        assert_eq!(outcome.surge_multiplier, Decimal::new(212, 2));
        assert_eq!(outcome.primary_surge_reason.as_deref(), Some("distance"));

        let names: Vec<&str> = outcome.breakdown.iter().map(|m| m.rule_name()).collect();
        assert_eq!(names, vec!["base_fee", "distance"]);
    }

    #[test]
    fn no_applicable_surge_yields_multiplier_one() {
        let snapshot = RateSnapshot::new(
            BaseFeeConfig::new(money(30)),
            vec![band(0, 3, 5)],
            vec![],
            vec![],
            vec![],
            None,
        );
        let context = context();
        // Distance outside every band: no distance surcharge.
        let inputs = inputs(&context, &snapshot, Decimal::new(25, 0));

        let outcome = RulePipeline::evaluate(&RuleRegistry::standard(), &inputs).unwrap();
        assert_eq!(outcome.final_fee.get(), Decimal::new(30, 0));
        assert_eq!(outcome.surge_multiplier, Decimal::ONE);
        assert!(outcome.primary_surge_reason.is_none());
    }

    #[test]
    fn zero_base_defines_multiplier_as_one() {
        let snapshot = RateSnapshot::new(
            BaseFeeConfig::new(Money::zero()),
            vec![band(0, 10, 8)],
            vec![],
            vec![],
            vec![],
            None,
        );
        let context = context();
        let inputs = inputs(&context, &snapshot, Decimal::new(4, 0));

        let outcome = RulePipeline::evaluate(&RuleRegistry::standard(), &inputs).unwrap();
        assert_eq!(outcome.surge_multiplier, Decimal::ONE);
    }

    #[test]
    fn cap_clamps_and_records_only_when_changing() {
        let snapshot = RateSnapshot::new(
            base_with_bounds(30, 20, 50),
            vec![band(0, 100, 10)],
            vec![],
            vec![],
            vec![],
            None,
        );
        let context = context();
        // 30 + 40*10 = 430, capped at 50.
        let rule_inputs = inputs(&context, &snapshot, Decimal::new(40, 0));

        let outcome = RulePipeline::evaluate(&RuleRegistry::standard(), &rule_inputs).unwrap();
        assert_eq!(outcome.final_fee.get(), Decimal::new(50, 0));

        let cap_entries: Vec<_> = outcome
            .breakdown
            .iter()
            .filter(|m| m.rule_name() == "min_max_cap")
            .collect();
        assert_eq!(cap_entries.len(), 1);

        // Within bounds: no cap entry.
        let rule_inputs = inputs(&context, &snapshot, Decimal::new(1, 0));
        let outcome = RulePipeline::evaluate(&RuleRegistry::standard(), &rule_inputs).unwrap();
        assert!(
            outcome
                .breakdown
                .iter()
                .all(|m| m.rule_name() != "min_max_cap")
        );
    }

    #[test]
    fn minimum_fee_raises_total() {
        let snapshot = RateSnapshot::new(
            base_with_bounds(10, 25, 100),
            vec![band(0, 3, 1)],
            vec![],
            vec![],
            vec![],
            None,
        );
        let context = context();
        // 10 + 2*1 = 12, raised to 25.
        let inputs = inputs(&context, &snapshot, Decimal::new(2, 0));

        let outcome = RulePipeline::evaluate(&RuleRegistry::standard(), &inputs).unwrap();
        assert_eq!(outcome.final_fee.get(), Decimal::new(25, 0));
    }

    #[test]
    fn overlapping_time_surges_stack() {
        let window = |start: u32, end: u32, amount: i64, label: &str| {
            TimeSurge::new(
                Weekday::Fri,
                NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
                Decimal::new(amount, 0),
                label,
            )
            .unwrap()
        };
        let snapshot = RateSnapshot::new(
            BaseFeeConfig::new(money(30)),
            vec![],
            vec![window(18, 21, 10, "dinner"), window(19, 20, 5, "peak")],
            vec![],
            vec![],
            None,
        );
        let context = context_at(Timestamp::from_ymd_hms(2026, 8, 7, 19, 30, 0).unwrap());
        let inputs = inputs(&context, &snapshot, Decimal::new(50, 0));

        let outcome = RulePipeline::evaluate(&RuleRegistry::standard(), &inputs).unwrap();
        // 30 base + (10 + 5) summed windows.
        assert_eq!(outcome.final_fee.get(), Decimal::new(45, 0));
        assert_eq!(outcome.primary_surge_reason.as_deref(), Some("time_surge"));
    }

    #[test]
    fn primary_reason_is_largest_positive_contributor() {
        let snapshot = RateSnapshot::new(
            BaseFeeConfig::new(money(30)),
            vec![band(0, 10, 1)],
            vec![],
            vec![
                WeatherSurge::new(WeatherCondition::Storm, Decimal::new(40, 0)).unwrap(),
            ],
            vec![DemandSurge::new(10, Decimal::new(5, 0)).unwrap()],
            None,
        );
        let context = context();
        let mut inputs = inputs(&context, &snapshot, Decimal::new(4, 0));
        inputs.weather = WeatherCondition::Storm;
        inputs.orders_per_hour = 20;

        let outcome = RulePipeline::evaluate(&RuleRegistry::standard(), &inputs).unwrap();
        assert_eq!(
            outcome.primary_surge_reason.as_deref(),
            Some("weather_surge")
        );
    }

    #[test]
    fn promo_discounts_after_surges() {
        let registry = RuleRegistry::standard_with_promotions(PromoRule::single(
            "WELCOME10",
            Decimal::new(10, 0),
        ));
        let snapshot = RateSnapshot::new(
            BaseFeeConfig::new(money(30)),
            vec![band(0, 10, 5)],
            vec![],
            vec![],
            vec![],
            None,
        );
        let context = context_with_promo("WELCOME10");
        // 30 + 4*5 = 50, minus 10% = 45.
        let inputs = inputs(&context, &snapshot, Decimal::new(4, 0));

        let outcome = RulePipeline::evaluate(&registry, &inputs).unwrap();
        assert_eq!(outcome.final_fee.get(), Decimal::new(45, 0));
    }

    #[test]
    fn total_never_goes_negative() {
        let registry = RuleRegistry::standard_with_promotions(PromoRule::single(
            "FREE",
            Decimal::new(100, 0),
        ));
        let snapshot = RateSnapshot::new(
            BaseFeeConfig::new(money(30)),
            vec![band(0, 10, 5)],
            vec![],
            vec![],
            vec![],
            None,
        );
        let context = context_with_promo("FREE");
        let inputs = inputs(&context, &snapshot, Decimal::new(4, 0));

        let outcome = RulePipeline::evaluate(&registry, &inputs).unwrap();
        assert!(outcome.final_fee.get() >= Decimal::ZERO);
    }

    #[test]
    fn repeated_runs_produce_identical_breakdowns() {
        let snapshot = RateSnapshot::new(
            BaseFeeConfig::new(money(30)),
            vec![band(0, 10, 8)],
            vec![],
            vec![
                WeatherSurge::new(WeatherCondition::LightRain, Decimal::new(6, 0)).unwrap(),
            ],
            vec![DemandSurge::new(10, Decimal::new(5, 0)).unwrap()],
            None,
        );
        let registry = RuleRegistry::standard();
        let context = context();
        let mut first_inputs = inputs(&context, &snapshot, Decimal::new(4, 0));
        first_inputs.weather = WeatherCondition::LightRain;
        first_inputs.orders_per_hour = 15;

        let first = RulePipeline::evaluate(&registry, &first_inputs).unwrap();
        for _ in 0..5 {
            let run = RulePipeline::evaluate(&registry, &first_inputs).unwrap();
            assert_eq!(run.breakdown, first.breakdown);
            assert_eq!(run.final_fee, first.final_fee);
        }

        // Breakdown order follows ascending rule priority.
        let names: Vec<&str> = first.breakdown.iter().map(|m| m.rule_name()).collect();
        assert_eq!(
            names,
            vec!["base_fee", "distance", "weather_surge", "demand_surge"]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Increasing distance never decreases the distance contribution.
            #[test]
            fn distance_contribution_is_monotonic(
                d1 in 0u32..20_000,
                d2 in 0u32..20_000,
            ) {
                let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
                let snapshot = RateSnapshot::new(
                    BaseFeeConfig::new(money(30)),
                    vec![band(0, 3, 5), band(3, 6, 8), band(6, 25, 10)],
                    vec![], vec![], vec![], None,
                );
                let context = context();
                let registry = RuleRegistry::standard();

                let contribution = |metres: u32| {
                    let km = Decimal::new(i64::from(metres), 3);
                    let inputs = inputs(&context, &snapshot, km);
                    let outcome = RulePipeline::evaluate(&registry, &inputs).unwrap();
                    outcome
                        .breakdown
                        .iter()
                        .find(|m| m.rule_name() == "distance")
                        .map_or(Decimal::ZERO, |m| m.amount())
                };

                prop_assert!(contribution(lo) <= contribution(hi));
            }

            // The final fee always lands inside configured bounds.
            #[test]
            fn final_fee_respects_bounds(metres in 0u32..100_000) {
                let snapshot = RateSnapshot::new(
                    base_with_bounds(30, 20, 120),
                    vec![band(0, 200, 9)],
                    vec![], vec![], vec![], None,
                );
                let context = context();
                let km = Decimal::new(i64::from(metres), 3);
                let inputs = inputs(&context, &snapshot, km);

                let outcome =
                    RulePipeline::evaluate(&RuleRegistry::standard(), &inputs).unwrap();
                prop_assert!(outcome.final_fee.get() >= Decimal::new(20, 0));
                prop_assert!(outcome.final_fee.get() <= Decimal::new(120, 0));
            }

            // The multiplier never drops below one.
            #[test]
            fn multiplier_is_at_least_one(metres in 0u32..50_000) {
                let snapshot = RateSnapshot::new(
                    BaseFeeConfig::new(money(30)),
                    vec![band(0, 10, 8)],
                    vec![], vec![], vec![], None,
                );
                let context = context();
                let km = Decimal::new(i64::from(metres), 3);
                let inputs = inputs(&context, &snapshot, km);

                let outcome =
                    RulePipeline::evaluate(&RuleRegistry::standard(), &inputs).unwrap();
                prop_assert!(outcome.surge_multiplier >= Decimal::ONE);
            }
        }
    }
}
