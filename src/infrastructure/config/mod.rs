//! # Rate Configuration Store
//!
//! Read-only port for the externally persisted rate tables.
//!
//! The engine never owns persistence; it consumes this port to read the
//! active base fee, distance bands, and surge tables once per request.
//!
//! # Examples
//!
//! ```ignore
//! let base = store.active_base_fee().await?.ok_or(PricingError::ConfigNotFound)?;
//! ```

pub mod in_memory;

use crate::domain::entities::rate_config::{
    BaseFeeConfig, DemandSurge, DistanceRate, SpecialDaySurge, TimeSurge, WeatherSurge,
};
use crate::domain::errors::PricingError;
use crate::domain::value_objects::weather::WeatherCondition;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

pub use in_memory::InMemoryRateConfigStore;

/// Error type for configuration store operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A required configuration record does not exist.
    #[error("configuration not found: {0}")]
    NotFound(String),

    /// The backing store failed.
    #[error("configuration storage error: {0}")]
    Storage(String),
}

impl ConfigError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates a storage error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

impl From<ConfigError> for PricingError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::NotFound(_) => Self::ConfigNotFound,
            ConfigError::Storage(message) => Self::calculation_failed(message),
        }
    }
}

/// Result type for configuration store operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Read-only access to the active rate configuration.
///
/// Implementations are expected to return only *active* records; the engine
/// does no further filtering.
#[async_trait]
pub trait RateConfigStore: Send + Sync + fmt::Debug {
    /// Returns the single active base fee configuration, if one exists.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on storage failure.
    async fn active_base_fee(&self) -> ConfigResult<Option<BaseFeeConfig>>;

    /// Returns all active distance bands, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on storage failure.
    async fn active_distance_rates(&self) -> ConfigResult<Vec<DistanceRate>>;

    /// Returns all active time surge windows.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on storage failure.
    async fn active_time_surges(&self) -> ConfigResult<Vec<TimeSurge>>;

    /// Returns all active weather surges.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on storage failure.
    async fn active_weather_surges(&self) -> ConfigResult<Vec<WeatherSurge>>;

    /// Returns all active demand surge tiers.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on storage failure.
    async fn active_demand_surges(&self) -> ConfigResult<Vec<DemandSurge>>;

    /// Returns the active special-day surge for a date, if configured.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on storage failure.
    async fn special_day_surge(&self, date: NaiveDate) -> ConfigResult<Option<SpecialDaySurge>>;

    /// Returns the active weather surge for a condition, if configured.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on storage failure.
    async fn weather_surge(
        &self,
        condition: WeatherCondition,
    ) -> ConfigResult<Option<WeatherSurge>> {
        let surges = self.active_weather_surges().await?;
        Ok(surges.into_iter().find(|s| s.condition() == condition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_config_not_found() {
        let error: PricingError = ConfigError::not_found("base fee").into();
        assert_eq!(error, PricingError::ConfigNotFound);
    }

    #[test]
    fn storage_maps_to_calculation_failed() {
        let error: PricingError = ConfigError::storage("connection reset").into();
        assert!(matches!(error, PricingError::CalculationFailed { .. }));
    }
}
