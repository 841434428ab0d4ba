//! # Delivery Fee Engine
//!
//! Orchestrates one pricing computation end to end.
//!
//! The engine computes the pickup-to-drop distance, fetches the weather
//! and demand signals and the third-party quote concurrently, runs the
//! sequential rule pipeline, and assembles the final [`PricingResult`].
//! The rule pipeline blocks on weather and demand (surge rules need them)
//! but not on the third-party quote, which is joined only at assembly.

use crate::application::rules::{RateSnapshot, RuleInputs, RuleRegistry};
use crate::application::services::pipeline::RulePipeline;
use crate::domain::entities::context::PricingContext;
use crate::domain::entities::quote::DeliveryQuote;
use crate::domain::entities::result::PricingResult;
use crate::domain::errors::{DomainResult, PricingError};
use crate::domain::value_objects::ids::QuoteId;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::weather::WeatherCondition;
use crate::infrastructure::config::RateConfigStore;
use crate::infrastructure::courier::CourierQuoteProvider;
use crate::infrastructure::signals::{CachedDemandTracker, CachedWeatherProvider};
use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Configuration for the fee engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Timeout for each surge-signal fetch in milliseconds.
    pub signal_timeout_ms: u64,
    /// Timeout for the third-party quote fetch in milliseconds.
    pub courier_timeout_ms: u64,
    /// Validity window of the internal quote in seconds.
    pub quote_validity_secs: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            signal_timeout_ms: 1500,
            courier_timeout_ms: 3000,
            quote_validity_secs: 300,
        }
    }
}

impl EngineConfig {
    /// Sets the surge-signal timeout.
    #[must_use]
    pub fn with_signal_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.signal_timeout_ms = timeout_ms;
        self
    }

    /// Sets the third-party quote timeout.
    #[must_use]
    pub fn with_courier_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.courier_timeout_ms = timeout_ms;
        self
    }

    /// Sets the internal quote validity window.
    #[must_use]
    pub fn with_quote_validity_secs(mut self, secs: i64) -> Self {
        self.quote_validity_secs = secs;
        self
    }
}

/// Engine computing delivery fees from rules, signals, and quotes.
#[derive(Debug)]
pub struct DeliveryFeeEngine {
    config_store: Arc<dyn RateConfigStore>,
    weather: Arc<CachedWeatherProvider>,
    demand: Arc<CachedDemandTracker>,
    courier: Arc<dyn CourierQuoteProvider>,
    registry: RuleRegistry,
    config: EngineConfig,
}

impl DeliveryFeeEngine {
    /// Creates a new engine.
    #[must_use]
    pub fn new(
        config_store: Arc<dyn RateConfigStore>,
        weather: Arc<CachedWeatherProvider>,
        demand: Arc<CachedDemandTracker>,
        courier: Arc<dyn CourierQuoteProvider>,
        registry: RuleRegistry,
        config: EngineConfig,
    ) -> Self {
        Self {
            config_store,
            weather,
            demand,
            courier,
            registry,
            config,
        }
    }

    /// Creates an engine with the standard rule registry and defaults.
    #[must_use]
    pub fn with_defaults(
        config_store: Arc<dyn RateConfigStore>,
        weather: Arc<CachedWeatherProvider>,
        demand: Arc<CachedDemandTracker>,
        courier: Arc<dyn CourierQuoteProvider>,
    ) -> Self {
        Self::new(
            config_store,
            weather,
            demand,
            courier,
            RuleRegistry::standard(),
            EngineConfig::default(),
        )
    }

    /// Returns the engine configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes the delivery fee for a pricing context.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidDistance`] - distance cannot be computed
    /// - [`PricingError::ConfigNotFound`] - no active base fee
    /// - [`PricingError::NoActiveRules`] - no surcharge rule configured
    /// - [`PricingError::CalculationFailed`] - configuration store fault
    ///
    /// External-signal failures and third-party quote unavailability are
    /// never errors; they degrade to safe defaults or an omitted quote.
    pub async fn calculate_delivery_fee(
        &self,
        context: &PricingContext,
    ) -> DomainResult<PricingResult> {
        let distance_km = compute_distance_km(context)?;
        tracing::debug!(distance_km = %distance_km, "computed delivery distance");

        // The courier fetch runs for the whole computation and is joined
        // only at assembly.
        let courier_handle = self.spawn_courier_fetch(context);

        let signal_timeout = Duration::from_millis(self.config.signal_timeout_ms);
        let weather_fut = async {
            match timeout(
                signal_timeout,
                self.weather.current_conditions(context.pickup()),
            )
            .await
            {
                Ok(condition) => condition,
                Err(_) => {
                    tracing::warn!("weather signal timed out, defaulting to clear");
                    WeatherCondition::Clear
                }
            }
        };
        let demand_fut = async {
            match timeout(
                signal_timeout,
                self.demand.orders_per_hour(Some(context.restaurant_id())),
            )
            .await
            {
                Ok(orders) => orders,
                Err(_) => {
                    tracing::warn!("demand signal timed out, defaulting to zero");
                    0
                }
            }
        };

        let (snapshot, weather, orders_per_hour) = tokio::join!(
            self.load_snapshot(context.requested_at().date()),
            weather_fut,
            demand_fut,
        );
        let snapshot = snapshot?;

        if !snapshot.has_surcharge_rules() {
            return Err(PricingError::NoActiveRules);
        }

        let inputs = RuleInputs {
            context,
            distance_km,
            weather,
            orders_per_hour,
            rates: &snapshot,
        };
        let outcome = RulePipeline::evaluate(&self.registry, &inputs)?;
        tracing::debug!(
            final_fee = %outcome.final_fee,
            multiplier = %outcome.surge_multiplier,
            isolated = outcome.rules_isolated,
            "rule pipeline completed"
        );

        let courier_quote = match courier_handle.await {
            Ok(quote) if quote.is_success() => Some(quote),
            Ok(quote) => {
                tracing::debug!(
                    reason = quote.error_message().unwrap_or("unknown"),
                    "third-party quote omitted"
                );
                None
            }
            Err(error) => {
                tracing::warn!(error = %error, "courier fetch task failed");
                None
            }
        };

        let mut expires_at = Timestamp::now().add_secs(self.config.quote_validity_secs);
        if let Some(courier_expiry) = courier_quote.as_ref().and_then(|q| q.expires_at()) {
            if courier_expiry.is_before(&expires_at) {
                expires_at = courier_expiry;
            }
        }

        Ok(PricingResult::new(
            QuoteId::new_v4(),
            expires_at,
            outcome.base_fee,
            outcome.final_fee,
            outcome.surge_multiplier,
            outcome.primary_surge_reason,
            courier_quote,
            outcome.breakdown,
        ))
    }

    fn spawn_courier_fetch(
        &self,
        context: &PricingContext,
    ) -> tokio::task::JoinHandle<DeliveryQuote> {
        let courier = Arc::clone(&self.courier);
        let context = context.clone();
        let courier_timeout = Duration::from_millis(self.config.courier_timeout_ms);

        tokio::spawn(async move {
            match timeout(courier_timeout, courier.fetch_quote(&context)).await {
                Ok(quote) => quote,
                Err(_) => DeliveryQuote::failed(format!(
                    "courier quote timed out after {}ms",
                    courier_timeout.as_millis()
                )),
            }
        })
    }

    /// Reads the full rate snapshot for one request.
    async fn load_snapshot(&self, date: NaiveDate) -> DomainResult<RateSnapshot> {
        let store = self.config_store.as_ref();
        let (base, distance_rates, time_surges, weather_surges, demand_surges, special_day) = tokio::join!(
            store.active_base_fee(),
            store.active_distance_rates(),
            store.active_time_surges(),
            store.active_weather_surges(),
            store.active_demand_surges(),
            store.special_day_surge(date),
        );

        let base = base?.ok_or(PricingError::ConfigNotFound)?;
        Ok(RateSnapshot::new(
            base,
            distance_rates?,
            time_surges?,
            weather_surges?,
            demand_surges?,
            special_day?,
        ))
    }
}

/// Computes the haversine distance for a context as a decimal in km.
fn compute_distance_km(context: &PricingContext) -> DomainResult<Decimal> {
    let distance = context.pickup().distance_km(context.drop_off());
    if !distance.is_finite() {
        return Err(PricingError::invalid_distance(format!(
            "distance between {} and {} is not finite",
            context.pickup(),
            context.drop_off()
        )));
    }
    Decimal::from_f64(distance)
        .map(|d| d.round_dp(3))
        .ok_or_else(|| {
            PricingError::invalid_distance(format!("distance {distance} is not representable"))
        })
}
