//! # Surge Rules
//!
//! Contextual surcharges: time-of-day windows, weather, demand tiers, and
//! special calendar days.
//!
//! All surge amounts are flat additions. Stacking semantics differ per rule:
//! overlapping time windows are summed, demand tiers take the steepest tier
//! reached, weather and special-day are single lookups.

use crate::application::rules::RuleInputs;
use crate::domain::entities::rate_config::{DemandSurge, TimeSurge};
use crate::domain::errors::{DomainResult, PricingError};
use crate::domain::value_objects::modification::PriceModification;
use rust_decimal::Decimal;

/// Sum of all matching time-of-day surge windows.
///
/// Matching is inclusive at window start, exclusive at window end. When
/// multiple windows match, their amounts are summed so concurrent
/// promotions stack deterministically.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSurgeRule;

impl TimeSurgeRule {
    /// Stable rule name.
    pub const NAME: &'static str = "time_surge";
    /// Priority within the surge block.
    pub const PRIORITY: u16 = 20;

    fn matching_windows<'a>(&self, inputs: &RuleInputs<'a>) -> Vec<&'a TimeSurge> {
        let day = inputs.context.requested_at().weekday();
        let time = inputs.context.requested_at().time_of_day();
        inputs
            .rates
            .time_surges()
            .iter()
            .filter(|surge| surge.is_active() && surge.matches(day, time))
            .collect()
    }

    /// Applies when at least one active window contains the evaluation time.
    #[must_use]
    pub fn applies(&self, inputs: &RuleInputs<'_>) -> bool {
        !self.matching_windows(inputs).is_empty()
    }

    /// Sums every matching window into one flat modification.
    ///
    /// # Errors
    ///
    /// Returns `CalculationFailed` on arithmetic overflow.
    pub fn calculate(&self, inputs: &RuleInputs<'_>) -> DomainResult<Option<PriceModification>> {
        let windows = self.matching_windows(inputs);
        if windows.is_empty() {
            return Ok(None);
        }

        let mut total = Decimal::ZERO;
        for window in &windows {
            total = total.checked_add(window.amount()).ok_or_else(|| {
                PricingError::calculation_failed("time surge sum overflowed")
            })?;
        }

        let description = match windows.as_slice() {
            [only] => only.description().to_string(),
            many => format!("{} overlapping time surge windows", many.len()),
        };

        Ok(Some(PriceModification::flat(
            Self::NAME,
            description,
            total,
            Self::PRIORITY,
        )))
    }
}

/// Flat surcharge for the fetched weather condition.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherSurgeRule;

impl WeatherSurgeRule {
    /// Stable rule name.
    pub const NAME: &'static str = "weather_surge";
    /// Priority within the surge block.
    pub const PRIORITY: u16 = 30;

    /// Applies when the fetched condition has an active surge entry.
    #[must_use]
    pub fn applies(&self, inputs: &RuleInputs<'_>) -> bool {
        inputs
            .rates
            .weather_surges()
            .iter()
            .any(|surge| surge.is_active() && surge.condition() == inputs.weather)
    }

    /// Emits the configured amount for the fetched condition.
    ///
    /// # Errors
    ///
    /// Infallible in practice; typed for the uniform rule contract.
    pub fn calculate(&self, inputs: &RuleInputs<'_>) -> DomainResult<Option<PriceModification>> {
        let Some(surge) = inputs
            .rates
            .weather_surges()
            .iter()
            .find(|surge| surge.is_active() && surge.condition() == inputs.weather)
        else {
            return Ok(None);
        };

        Ok(Some(PriceModification::flat(
            Self::NAME,
            format!("weather surcharge ({})", surge.condition()),
            surge.amount(),
            Self::PRIORITY,
        )))
    }
}

/// Steepest satisfied demand tier.
///
/// Tiers are configured as orders-per-hour thresholds; among the tiers the
/// fetched metric satisfies, the highest threshold wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemandSurgeRule;

impl DemandSurgeRule {
    /// Stable rule name.
    pub const NAME: &'static str = "demand_surge";
    /// Priority within the surge block.
    pub const PRIORITY: u16 = 40;

    fn steepest_tier<'a>(&self, inputs: &RuleInputs<'a>) -> Option<&'a DemandSurge> {
        inputs
            .rates
            .demand_surges()
            .iter()
            .filter(|tier| tier.is_active() && tier.is_met(inputs.orders_per_hour))
            .max_by_key(|tier| tier.threshold())
    }

    /// Applies when the demand metric reaches any active tier.
    #[must_use]
    pub fn applies(&self, inputs: &RuleInputs<'_>) -> bool {
        self.steepest_tier(inputs).is_some()
    }

    /// Emits the steepest satisfied tier's amount.
    ///
    /// # Errors
    ///
    /// Infallible in practice; typed for the uniform rule contract.
    pub fn calculate(&self, inputs: &RuleInputs<'_>) -> DomainResult<Option<PriceModification>> {
        let Some(tier) = self.steepest_tier(inputs) else {
            return Ok(None);
        };

        Ok(Some(PriceModification::flat(
            Self::NAME,
            format!(
                "demand surge ({} orders/hour, tier {})",
                inputs.orders_per_hour,
                tier.threshold()
            ),
            tier.amount(),
            Self::PRIORITY,
        )))
    }
}

/// Flat surcharge on configured calendar dates.
///
/// The engine resolves the evaluation date's entry into the snapshot; this
/// rule only has to look at it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialDayRule;

impl SpecialDayRule {
    /// Stable rule name.
    pub const NAME: &'static str = "special_day";
    /// Priority within the surge block.
    pub const PRIORITY: u16 = 50;

    /// Applies when the evaluation date has an active surge entry.
    #[must_use]
    pub fn applies(&self, inputs: &RuleInputs<'_>) -> bool {
        inputs
            .rates
            .special_day()
            .is_some_and(|surge| surge.is_active())
    }

    /// Emits the configured special-day amount.
    ///
    /// # Errors
    ///
    /// Infallible in practice; typed for the uniform rule contract.
    pub fn calculate(&self, inputs: &RuleInputs<'_>) -> DomainResult<Option<PriceModification>> {
        let Some(surge) = inputs.rates.special_day().filter(|s| s.is_active()) else {
            return Ok(None);
        };

        Ok(Some(PriceModification::flat(
            Self::NAME,
            surge.description().to_string(),
            surge.amount(),
            Self::PRIORITY,
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::rules::test_support::{context_at, inputs, snapshot_with_base};
    use crate::application::rules::RateSnapshot;
    use crate::domain::entities::rate_config::{BaseFeeConfig, SpecialDaySurge, WeatherSurge};
    use crate::domain::value_objects::money::Money;
    use crate::domain::value_objects::timestamp::Timestamp;
    use crate::domain::value_objects::weather::WeatherCondition;
    use chrono::{NaiveDate, NaiveTime, Weekday};

    fn money_snapshot(
        time_surges: Vec<TimeSurge>,
        weather_surges: Vec<WeatherSurge>,
        demand_surges: Vec<DemandSurge>,
        special_day: Option<SpecialDaySurge>,
    ) -> RateSnapshot {
        RateSnapshot::new(
            BaseFeeConfig::new(Money::new(Decimal::new(30, 0)).unwrap()),
            vec![],
            time_surges,
            weather_surges,
            demand_surges,
            special_day,
        )
    }

    fn window(
        day: Weekday,
        start: (u32, u32),
        end: (u32, u32),
        amount: i64,
        description: &str,
    ) -> TimeSurge {
        TimeSurge::new(
            day,
            NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            Decimal::new(amount, 0),
            description,
        )
        .unwrap()
    }

    mod time_surge {
        use super::*;

        // 2026-08-07 19:30 UTC is a Friday evening.
        fn friday_evening() -> Timestamp {
            Timestamp::from_ymd_hms(2026, 8, 7, 19, 30, 0).unwrap()
        }

        #[test]
        fn single_window_match() {
            let snapshot = money_snapshot(
                vec![window(Weekday::Fri, (18, 0), (21, 0), 10, "dinner rush")],
                vec![],
                vec![],
                None,
            );
            let context = context_at(friday_evening());
            let inputs = inputs(&context, &snapshot);

            let modification = TimeSurgeRule.calculate(&inputs).unwrap().unwrap();
            assert_eq!(modification.amount(), Decimal::new(10, 0));
            assert_eq!(modification.description(), "dinner rush");
        }

        #[test]
        fn overlapping_windows_are_summed() {
            let snapshot = money_snapshot(
                vec![
                    window(Weekday::Fri, (18, 0), (21, 0), 10, "dinner rush"),
                    window(Weekday::Fri, (19, 0), (20, 0), 5, "friday peak"),
                ],
                vec![],
                vec![],
                None,
            );
            let context = context_at(friday_evening());
            let inputs = inputs(&context, &snapshot);

            let modification = TimeSurgeRule.calculate(&inputs).unwrap().unwrap();
            assert_eq!(modification.amount(), Decimal::new(15, 0));
            assert!(modification.description().contains("2 overlapping"));
        }

        #[test]
        fn wrong_day_does_not_apply() {
            let snapshot = money_snapshot(
                vec![window(Weekday::Mon, (18, 0), (21, 0), 10, "monday rush")],
                vec![],
                vec![],
                None,
            );
            let context = context_at(friday_evening());
            let inputs = inputs(&context, &snapshot);
            assert!(!TimeSurgeRule.applies(&inputs));
        }

        #[test]
        fn window_end_is_exclusive() {
            let snapshot = money_snapshot(
                vec![window(Weekday::Fri, (18, 0), (19, 30), 10, "early evening")],
                vec![],
                vec![],
                None,
            );
            let context = context_at(friday_evening());
            let inputs = inputs(&context, &snapshot);
            assert!(!TimeSurgeRule.applies(&inputs));
        }

        #[test]
        fn inactive_windows_are_ignored() {
            let snapshot = money_snapshot(
                vec![
                    window(Weekday::Fri, (18, 0), (21, 0), 10, "dinner rush").with_active(false),
                ],
                vec![],
                vec![],
                None,
            );
            let context = context_at(friday_evening());
            let inputs = inputs(&context, &snapshot);
            assert!(!TimeSurgeRule.applies(&inputs));
        }
    }

    mod weather_surge {
        use super::*;

        #[test]
        fn applies_for_configured_condition() {
            let snapshot = money_snapshot(
                vec![],
                vec![WeatherSurge::new(WeatherCondition::HeavyRain, Decimal::new(12, 0)).unwrap()],
                vec![],
                None,
            );
            let context = crate::application::rules::test_support::context();
            let mut inputs = inputs(&context, &snapshot);
            inputs.weather = WeatherCondition::HeavyRain;

            let modification = WeatherSurgeRule.calculate(&inputs).unwrap().unwrap();
            assert_eq!(modification.amount(), Decimal::new(12, 0));
        }

        #[test]
        fn clear_weather_with_no_entry_does_not_apply() {
            let snapshot = money_snapshot(
                vec![],
                vec![WeatherSurge::new(WeatherCondition::HeavyRain, Decimal::new(12, 0)).unwrap()],
                vec![],
                None,
            );
            let context = crate::application::rules::test_support::context();
            let inputs = inputs(&context, &snapshot);
            assert!(!WeatherSurgeRule.applies(&inputs));
        }
    }

    mod demand_surge {
        use super::*;

        fn tiers() -> Vec<DemandSurge> {
            vec![
                DemandSurge::new(30, Decimal::new(5, 0)).unwrap(),
                DemandSurge::new(60, Decimal::new(15, 0)).unwrap(),
                DemandSurge::new(100, Decimal::new(30, 0)).unwrap(),
            ]
        }

        #[test]
        fn takes_steepest_satisfied_tier() {
            let snapshot = money_snapshot(vec![], vec![], tiers(), None);
            let context = crate::application::rules::test_support::context();
            let mut inputs = inputs(&context, &snapshot);
            inputs.orders_per_hour = 75;

            let modification = DemandSurgeRule.calculate(&inputs).unwrap().unwrap();
            assert_eq!(modification.amount(), Decimal::new(15, 0));
        }

        #[test]
        fn threshold_is_inclusive() {
            let snapshot = money_snapshot(vec![], vec![], tiers(), None);
            let context = crate::application::rules::test_support::context();
            let mut inputs = inputs(&context, &snapshot);
            inputs.orders_per_hour = 100;

            let modification = DemandSurgeRule.calculate(&inputs).unwrap().unwrap();
            assert_eq!(modification.amount(), Decimal::new(30, 0));
        }

        #[test]
        fn below_all_tiers_does_not_apply() {
            let snapshot = money_snapshot(vec![], vec![], tiers(), None);
            let context = crate::application::rules::test_support::context();
            let mut inputs = inputs(&context, &snapshot);
            inputs.orders_per_hour = 10;
            assert!(!DemandSurgeRule.applies(&inputs));
        }
    }

    mod special_day {
        use super::*;

        #[test]
        fn applies_when_snapshot_has_entry() {
            let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
            let snapshot = money_snapshot(
                vec![],
                vec![],
                vec![],
                Some(SpecialDaySurge::new(date, Decimal::new(25, 0), "new year's eve").unwrap()),
            );
            let context = crate::application::rules::test_support::context();
            let inputs = inputs(&context, &snapshot);

            let modification = SpecialDayRule.calculate(&inputs).unwrap().unwrap();
            assert_eq!(modification.amount(), Decimal::new(25, 0));
            assert_eq!(modification.description(), "new year's eve");
        }

        #[test]
        fn ordinary_day_does_not_apply() {
            let snapshot = snapshot_with_base(30);
            let context = crate::application::rules::test_support::context();
            let inputs = inputs(&context, &snapshot);
            assert!(!SpecialDayRule.applies(&inputs));
        }
    }
}
