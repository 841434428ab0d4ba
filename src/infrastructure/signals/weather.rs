//! # Weather Signal Provider
//!
//! Port definition for weather lookups plus the cached adapter the engine
//! consumes.
//!
//! The cached adapter keys its TTL cache by coordinates rounded to 2
//! decimal places, bounds every upstream fetch with a timeout, and folds
//! all failures into [`WeatherCondition::Clear`].

use crate::domain::value_objects::location::GeoPoint;
use crate::domain::value_objects::weather::WeatherCondition;
use crate::infrastructure::signals::cache::SignalCache;
use crate::infrastructure::signals::{SignalError, SignalResult};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Default cache TTL for weather lookups.
pub const DEFAULT_WEATHER_TTL: Duration = Duration::from_secs(15 * 60);

/// Default per-fetch timeout for the upstream provider.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(1500);

/// Trait defining the interface for weather providers.
///
/// Implementations fetch the current condition for a coordinate pair from
/// an external weather service.
#[async_trait]
pub trait WeatherProvider: Send + Sync + fmt::Debug {
    /// Returns the current weather condition at the given coordinates.
    ///
    /// # Errors
    ///
    /// - `SignalError::Upstream` - Provider request failed
    /// - `SignalError::Malformed` - Response could not be interpreted
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> SignalResult<WeatherCondition>;
}

/// Caching adapter over a [`WeatherProvider`].
///
/// Concurrent lookups for the same rounded-coordinate key within the TTL
/// window share one upstream call. Any failure (timeout, upstream error,
/// malformed response) yields [`WeatherCondition::Clear`].
#[derive(Debug)]
pub struct CachedWeatherProvider {
    inner: Arc<dyn WeatherProvider>,
    cache: SignalCache<String, WeatherCondition>,
    fetch_timeout: Duration,
}

impl CachedWeatherProvider {
    /// Creates a cached provider with the default 15-minute TTL.
    #[must_use]
    pub fn new(inner: Arc<dyn WeatherProvider>) -> Self {
        Self::with_ttl(inner, DEFAULT_WEATHER_TTL)
    }

    /// Creates a cached provider with a custom TTL.
    #[must_use]
    pub fn with_ttl(inner: Arc<dyn WeatherProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: SignalCache::new(ttl),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Sets the per-fetch timeout.
    #[must_use]
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Returns the weather condition for a location, from cache when fresh.
    ///
    /// Never fails: provider errors and timeouts fall back to
    /// [`WeatherCondition::Clear`].
    pub async fn current_conditions(&self, location: &GeoPoint) -> WeatherCondition {
        let key = location.rounded_key();
        let inner = Arc::clone(&self.inner);
        let fetch_timeout = self.fetch_timeout;
        let (latitude, longitude) = (location.latitude(), location.longitude());

        let fetched = self
            .cache
            .get_or_fetch(key, move || async move {
                match timeout(
                    fetch_timeout,
                    inner.current_conditions(latitude, longitude),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(SignalError::timeout(fetch_timeout.as_millis() as u64)),
                }
            })
            .await;

        match fetched {
            Ok(condition) => condition,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    latitude,
                    longitude,
                    "weather provider unavailable, defaulting to clear"
                );
                WeatherCondition::Clear
            }
        }
    }

    /// Returns the number of cached keys.
    #[must_use]
    pub fn cached_keys(&self) -> usize {
        self.cache.len()
    }
}
