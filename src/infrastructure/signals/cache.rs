//! # Coalescing TTL Cache
//!
//! Get-or-fetch cache where concurrent misses for the same key share one
//! upstream call.
//!
//! The map holds one async mutex per key. A caller that finds a fresh value
//! under the lock returns it; otherwise it performs the upstream fetch
//! while still holding the lock, so every concurrent caller for that key
//! awaits the same fetch instead of issuing duplicates. Cancelling the
//! in-flight caller just releases the lock: the next waiter retries, and
//! the cached entry is never poisoned.
//!
//! Failed fetches are not cached; only successful values occupy the TTL
//! window.
//!
//! # Examples
//!
//! ```
//! use delivery_pricing::infrastructure::signals::SignalCache;
//! use std::time::Duration;
//!
//! # async fn demo() {
//! let cache: SignalCache<String, u32> = SignalCache::new(Duration::from_secs(60));
//! let value = cache
//!     .get_or_fetch("key".to_string(), || async { Ok::<_, ()>(42) })
//!     .await;
//! assert_eq!(value, Ok(42));
//! # }
//! ```

use dashmap::DashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct CachedValue<V> {
    value: V,
    stored_at: Instant,
}

/// A TTL cache with per-key request coalescing.
///
/// The one piece of explicitly shared, concurrently mutated state in the
/// engine; everything else is immutable per request.
#[derive(Debug)]
pub struct SignalCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    slots: DashMap<K, Arc<Mutex<Option<CachedValue<V>>>>>,
    ttl: Duration,
}

impl<K, V> SignalCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache with the given time-to-live.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: DashMap::new(),
            ttl,
        }
    }

    /// Returns the configured time-to-live.
    #[inline]
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value for `key`, or runs `fetch` to obtain it.
    ///
    /// At most one upstream fetch runs per key at a time: concurrent
    /// callers await the per-key lock and observe the freshly stored value
    /// instead of fetching again. A failed fetch is returned to the caller
    /// but never stored, so the next caller retries upstream.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `fetch`; the cache itself never
    /// fails.
    pub async fn get_or_fetch<E, F, Fut>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self
            .slots
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone();

        let mut guard = slot.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.stored_at.elapsed() < self.ttl {
                return Ok(cached.value.clone());
            }
        }

        let value = fetch().await?;
        *guard = Some(CachedValue {
            value: value.clone(),
            stored_at: Instant::now(),
        });
        Ok(value)
    }

    /// Drops every entry whose TTL has elapsed.
    ///
    /// Keys with an in-flight fetch are left alone.
    pub fn purge_expired(&self) {
        self.slots.retain(|_, slot| {
            let Ok(guard) = slot.try_lock() else {
                return true;
            };
            guard
                .as_ref()
                .is_some_and(|cached| cached.stored_at.elapsed() < self.ttl)
        });
    }

    /// Returns the number of keys currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no keys are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
