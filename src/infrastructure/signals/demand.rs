//! # Demand Signal Provider
//!
//! Port definition for demand tracking plus the cached adapter the engine
//! consumes.
//!
//! Demand is measured in orders per hour, keyed by restaurant. It is more
//! volatile than weather, so its cache TTL is much shorter (1 minute). All
//! failures fold into a demand of 0, which disables the demand surge.

use crate::domain::value_objects::ids::RestaurantId;
use crate::infrastructure::signals::cache::SignalCache;
use crate::infrastructure::signals::{SignalError, SignalResult};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Default cache TTL for demand lookups.
pub const DEFAULT_DEMAND_TTL: Duration = Duration::from_secs(60);

/// Default per-fetch timeout for the upstream tracker.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(1500);

/// Cache key used when no restaurant is given.
const GLOBAL_KEY: &str = "global";

/// Trait defining the interface for demand trackers.
///
/// Implementations report the current order volume, either for one
/// restaurant or platform-wide when no restaurant is given.
#[async_trait]
pub trait DemandTracker: Send + Sync + fmt::Debug {
    /// Returns the current orders-per-hour metric.
    ///
    /// # Errors
    ///
    /// - `SignalError::Upstream` - Tracker request failed
    /// - `SignalError::Malformed` - Response could not be interpreted
    async fn orders_per_hour(&self, restaurant_id: Option<&RestaurantId>) -> SignalResult<u32>;
}

/// Caching adapter over a [`DemandTracker`].
///
/// Concurrent lookups for the same restaurant within the TTL window share
/// one upstream call. Any failure yields 0 orders per hour.
#[derive(Debug)]
pub struct CachedDemandTracker {
    inner: Arc<dyn DemandTracker>,
    cache: SignalCache<String, u32>,
    fetch_timeout: Duration,
}

impl CachedDemandTracker {
    /// Creates a cached tracker with the default 1-minute TTL.
    #[must_use]
    pub fn new(inner: Arc<dyn DemandTracker>) -> Self {
        Self::with_ttl(inner, DEFAULT_DEMAND_TTL)
    }

    /// Creates a cached tracker with a custom TTL.
    #[must_use]
    pub fn with_ttl(inner: Arc<dyn DemandTracker>, ttl: Duration) -> Self {
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

    /// Returns the orders-per-hour metric, from cache when fresh.
    ///
    /// Never fails: tracker errors and timeouts fall back to 0.
    pub async fn orders_per_hour(&self, restaurant_id: Option<&RestaurantId>) -> u32 {
        let key = restaurant_id
            .map_or_else(|| GLOBAL_KEY.to_string(), |id| id.as_str().to_string());
        let inner = Arc::clone(&self.inner);
        let fetch_timeout = self.fetch_timeout;
        let restaurant = restaurant_id.cloned();

        let fetched = self
            .cache
            .get_or_fetch(key, move || async move {
                match timeout(
                    fetch_timeout,
                    inner.orders_per_hour(restaurant.as_ref()),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(SignalError::timeout(fetch_timeout.as_millis() as u64)),
                }
            })
            .await;

        match fetched {
            Ok(orders) => orders,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    restaurant_id = ?restaurant_id.map(RestaurantId::as_str),
                    "demand tracker unavailable, defaulting to zero"
                );
                0
            }
        }
    }

    /// Returns the number of cached keys.
    #[must_use]
    pub fn cached_keys(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    #[derive(Debug)]
    struct StaticDemand {
        orders: u32,
        calls: AtomicUsize,
    }

    impl StaticDemand {
        fn new(orders: u32) -> Self {
            Self {
                orders,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DemandTracker for StaticDemand {
        async fn orders_per_hour(
            &self,
            _restaurant_id: Option<&RestaurantId>,
        ) -> SignalResult<u32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.orders)
        }
    }

    #[tokio::test]
    async fn returns_upstream_metric() {
        let tracker = CachedDemandTracker::new(Arc::new(StaticDemand::new(75)));
        let id = RestaurantId::new("rest-1");
        assert_eq!(tracker.orders_per_hour(Some(&id)).await, 75);
    }

    #[tokio::test]
    async fn same_restaurant_hits_cache() {
        let upstream = Arc::new(StaticDemand::new(40));
        let tracker = CachedDemandTracker::new(Arc::clone(&upstream) as Arc<dyn DemandTracker>);
        let id = RestaurantId::new("rest-1");

        tracker.orders_per_hour(Some(&id)).await;
        tracker.orders_per_hour(Some(&id)).await;

        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn different_restaurants_fetch_separately() {
        let upstream = Arc::new(StaticDemand::new(40));
        let tracker = CachedDemandTracker::new(Arc::clone(&upstream) as Arc<dyn DemandTracker>);

        tracker
            .orders_per_hour(Some(&RestaurantId::new("rest-1")))
            .await;
        tracker
            .orders_per_hour(Some(&RestaurantId::new("rest-2")))
            .await;
        tracker.orders_per_hour(None).await;

        assert_eq!(upstream.calls.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.cached_keys(), 3);
    }

    #[tokio::test]
    async fn failure_defaults_to_zero() {
        #[derive(Debug)]
        struct FailingDemand;

        #[async_trait]
        impl DemandTracker for FailingDemand {
            async fn orders_per_hour(
                &self,
                _restaurant_id: Option<&RestaurantId>,
            ) -> SignalResult<u32> {
                Err(SignalError::upstream("tracker down"))
            }
        }

        let tracker = CachedDemandTracker::new(Arc::new(FailingDemand));
        assert_eq!(tracker.orders_per_hour(None).await, 0);
    }

    #[tokio::test]
    async fn timeout_defaults_to_zero() {
        #[derive(Debug)]
        struct SlowDemand;

        #[async_trait]
        impl DemandTracker for SlowDemand {
            async fn orders_per_hour(
                &self,
                _restaurant_id: Option<&RestaurantId>,
            ) -> SignalResult<u32> {
                sleep(Duration::from_secs(5)).await;
                Ok(99)
            }
        }

        let tracker = CachedDemandTracker::new(Arc::new(SlowDemand))
            .with_fetch_timeout(Duration::from_millis(20));
        assert_eq!(tracker.orders_per_hour(None).await, 0);
    }

    #[tokio::test]
    async fn concurrent_lookups_coalesce() {
        #[derive(Debug)]
        struct SlowCountingDemand {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl DemandTracker for SlowCountingDemand {
            async fn orders_per_hour(
                &self,
                _restaurant_id: Option<&RestaurantId>,
            ) -> SignalResult<u32> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                sleep(Duration::from_millis(30)).await;
                Ok(55)
            }
        }

        let upstream = Arc::new(SlowCountingDemand {
            calls: AtomicUsize::new(0),
        });
        let tracker = Arc::new(CachedDemandTracker::new(
            Arc::clone(&upstream) as Arc<dyn DemandTracker>
        ));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let tracker = Arc::clone(&tracker);
            handles.push(tokio::spawn(async move {
                tracker
                    .orders_per_hour(Some(&RestaurantId::new("rest-1")))
                    .await
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 55);
        }

        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
    }
}
