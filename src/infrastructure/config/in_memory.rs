//! # In-Memory Rate Configuration Store
//!
//! In-memory implementation of [`RateConfigStore`] for tests and local
//! development.
//!
//! Uses thread-safe storage behind `tokio::sync::RwLock`, making it suitable
//! for unit tests without database dependencies.

use crate::domain::entities::rate_config::{
    BaseFeeConfig, DemandSurge, DistanceRate, SpecialDaySurge, TimeSurge, WeatherSurge,
};
use crate::infrastructure::config::{ConfigResult, RateConfigStore};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    base_fee: Option<BaseFeeConfig>,
    distance_rates: Vec<DistanceRate>,
    time_surges: Vec<TimeSurge>,
    weather_surges: Vec<WeatherSurge>,
    demand_surges: Vec<DemandSurge>,
    special_days: Vec<SpecialDaySurge>,
}

/// In-memory implementation of [`RateConfigStore`].
///
/// # Examples
///
/// ```
/// use delivery_pricing::infrastructure::config::InMemoryRateConfigStore;
/// use delivery_pricing::domain::entities::rate_config::BaseFeeConfig;
/// use delivery_pricing::domain::value_objects::Money;
/// use rust_decimal::Decimal;
///
/// # async fn demo() {
/// let store = InMemoryRateConfigStore::new();
/// store
///     .set_base_fee(BaseFeeConfig::new(Money::new(Decimal::new(30, 0)).unwrap()))
///     .await;
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateConfigStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryRateConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (replaces) the base fee configuration.
    pub async fn set_base_fee(&self, config: BaseFeeConfig) {
        let mut state = self.state.write().await;
        state.base_fee = Some(config);
    }

    /// Removes the base fee configuration.
    pub async fn clear_base_fee(&self) {
        let mut state = self.state.write().await;
        state.base_fee = None;
    }

    /// Adds a distance band.
    pub async fn add_distance_rate(&self, rate: DistanceRate) {
        let mut state = self.state.write().await;
        state.distance_rates.push(rate);
    }

    /// Adds a time surge window.
    pub async fn add_time_surge(&self, surge: TimeSurge) {
        let mut state = self.state.write().await;
        state.time_surges.push(surge);
    }

    /// Adds a weather surge.
    pub async fn add_weather_surge(&self, surge: WeatherSurge) {
        let mut state = self.state.write().await;
        state.weather_surges.push(surge);
    }

    /// Adds a demand surge tier.
    pub async fn add_demand_surge(&self, surge: DemandSurge) {
        let mut state = self.state.write().await;
        state.demand_surges.push(surge);
    }

    /// Adds a special-day surge.
    pub async fn add_special_day_surge(&self, surge: SpecialDaySurge) {
        let mut state = self.state.write().await;
        state.special_days.push(surge);
    }

    /// Clears all configuration.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = State::default();
    }
}

#[async_trait]
impl RateConfigStore for InMemoryRateConfigStore {
    async fn active_base_fee(&self) -> ConfigResult<Option<BaseFeeConfig>> {
        let state = self.state.read().await;
        Ok(state.base_fee.clone().filter(BaseFeeConfig::is_active))
    }

    async fn active_distance_rates(&self) -> ConfigResult<Vec<DistanceRate>> {
        let state = self.state.read().await;
        Ok(state
            .distance_rates
            .iter()
            .filter(|r| r.is_active())
            .cloned()
            .collect())
    }

    async fn active_time_surges(&self) -> ConfigResult<Vec<TimeSurge>> {
        let state = self.state.read().await;
        Ok(state
            .time_surges
            .iter()
            .filter(|s| s.is_active())
            .cloned()
            .collect())
    }

    async fn active_weather_surges(&self) -> ConfigResult<Vec<WeatherSurge>> {
        let state = self.state.read().await;
        Ok(state
            .weather_surges
            .iter()
            .filter(|s| s.is_active())
            .cloned()
            .collect())
    }

    async fn active_demand_surges(&self) -> ConfigResult<Vec<DemandSurge>> {
        let state = self.state.read().await;
        Ok(state
            .demand_surges
            .iter()
            .filter(|s| s.is_active())
            .cloned()
            .collect())
    }

    async fn special_day_surge(&self, date: NaiveDate) -> ConfigResult<Option<SpecialDaySurge>> {
        let state = self.state.read().await;
        Ok(state
            .special_days
            .iter()
            .find(|s| s.is_active() && s.date() == date)
            .cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::money::Money;
    use crate::domain::value_objects::weather::WeatherCondition;
    use rust_decimal::Decimal;

    fn money(value: i64) -> Money {
        Money::new(Decimal::new(value, 0)).unwrap()
    }

    #[tokio::test]
    async fn empty_store_has_no_base_fee() {
        let store = InMemoryRateConfigStore::new();
        assert!(store.active_base_fee().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inactive_base_fee_is_hidden() {
        let store = InMemoryRateConfigStore::new();
        store
            .set_base_fee(BaseFeeConfig::new(money(30)).with_active(false))
            .await;
        assert!(store.active_base_fee().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn active_filters_apply() {
        let store = InMemoryRateConfigStore::new();
        store
            .add_distance_rate(
                DistanceRate::new(Decimal::ZERO, Decimal::new(3, 0), Decimal::new(5, 0)).unwrap(),
            )
            .await;
        store
            .add_distance_rate(
                DistanceRate::new(Decimal::new(3, 0), Decimal::new(6, 0), Decimal::new(8, 0))
                    .unwrap()
                    .with_active(false),
            )
            .await;

        let rates = store.active_distance_rates().await.unwrap();
        assert_eq!(rates.len(), 1);
    }

    #[tokio::test]
    async fn weather_surge_lookup_by_condition() {
        let store = InMemoryRateConfigStore::new();
        store
            .add_weather_surge(
                WeatherSurge::new(WeatherCondition::HeavyRain, Decimal::new(12, 0)).unwrap(),
            )
            .await;

        let surge = store
            .weather_surge(WeatherCondition::HeavyRain)
            .await
            .unwrap();
        assert!(surge.is_some());

        let missing = store.weather_surge(WeatherCondition::Storm).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn special_day_lookup_by_date() {
        let store = InMemoryRateConfigStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        store
            .add_special_day_surge(
                SpecialDaySurge::new(date, Decimal::new(25, 0), "new year's eve").unwrap(),
            )
            .await;

        assert!(store.special_day_surge(date).await.unwrap().is_some());

        let other = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(store.special_day_surge(other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_resets_everything() {
        let store = InMemoryRateConfigStore::new();
        store.set_base_fee(BaseFeeConfig::new(money(30))).await;
        store.clear().await;
        assert!(store.active_base_fee().await.unwrap().is_none());
    }
}
