//! # Timestamp Value Object
//!
//! DateTime wrapper with domain-specific methods.
//!
//! This module provides the [`Timestamp`] type used for evaluation times
//! and quote expiries, plus the calendar accessors the time-of-day and
//! special-day surge rules match against.
//!
//! # Examples
//!
//! ```
//! use delivery_pricing::domain::value_objects::timestamp::Timestamp;
//!
//! let now = Timestamp::now();
//! let later = now.add_secs(60);
//!
//! assert!(later.is_after(&now));
//! ```

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A UTC timestamp.
///
/// Wraps `chrono::DateTime<Utc>` with domain-specific methods for quote
/// expiry and surge-window matching.
///
/// # Invariants
///
/// - Always in UTC timezone
///
/// # Examples
///
/// ```
/// use delivery_pricing::domain::value_objects::timestamp::Timestamp;
///
/// let in_five_minutes = Timestamp::now().add_secs(300);
/// assert!(!in_five_minutes.is_expired());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is out of chrono's representable range.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value is out of chrono's representable range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Creates a timestamp from calendar parts, for fixed-date tests and
    /// special-day configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delivery_pricing::domain::value_objects::timestamp::Timestamp;
    /// use chrono::Weekday;
    ///
    /// // 2026-01-01 was a Thursday.
    /// let ts = Timestamp::from_ymd_hms(2026, 1, 1, 19, 30, 0).unwrap();
    /// assert_eq!(ts.weekday(), Weekday::Thu);
    /// ```
    #[must_use]
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Self)
    }

    /// Returns the Unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Adds seconds to the timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use delivery_pricing::domain::value_objects::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::from_secs(1000).unwrap();
    /// assert_eq!(ts.add_secs(60).timestamp_secs(), 1060);
    /// ```
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Subtracts seconds from the timestamp.
    #[must_use]
    pub fn sub_secs(&self, secs: i64) -> Self {
        Self(self.0 - Duration::seconds(secs))
    }

    /// Returns true if this timestamp is in the past.
    ///
    /// # Examples
    ///
    /// ```
    /// use delivery_pricing::domain::value_objects::timestamp::Timestamp;
    ///
    /// assert!(Timestamp::from_secs(0).unwrap().is_expired());
    /// assert!(!Timestamp::now().add_secs(3600).is_expired());
    /// ```
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.0 < Utc::now()
    }

    /// Returns true if this timestamp is before another.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Returns true if this timestamp is after another.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Returns the calendar date.
    #[inline]
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Returns the day of week.
    #[inline]
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Returns the time of day, truncated to whole seconds.
    #[must_use]
    pub fn time_of_day(&self) -> NaiveTime {
        self.0
            .time()
            .with_nanosecond(0)
            .unwrap_or_else(|| self.0.time())
    }

    /// Formats the timestamp as ISO 8601.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Returns the underlying DateTime.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Add<std::time::Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: std::time::Duration) -> Self::Output {
        Self(self.0 + Duration::from_std(rhs).unwrap_or(Duration::zero()))
    }
}

impl Sub<std::time::Duration> for Timestamp {
    type Output = Self;

    fn sub(self, rhs: std::time::Duration) -> Self::Output {
        Self(self.0 - Duration::from_std(rhs).unwrap_or(Duration::zero()))
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = std::time::Duration;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        (self.0 - rhs.0)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn now_creates_current_time() {
            let before = Utc::now();
            let ts = Timestamp::now();
            let after = Utc::now();

            assert!(*ts.as_datetime() >= before);
            assert!(*ts.as_datetime() <= after);
        }

        #[test]
        fn from_secs_works() {
            let ts = Timestamp::from_secs(1704067200).unwrap();
            assert_eq!(ts.timestamp_secs(), 1704067200);
        }

        #[test]
        fn from_millis_works() {
            let ts = Timestamp::from_millis(1704067200123).unwrap();
            assert_eq!(ts.timestamp_millis(), 1704067200123);
        }

        #[test]
        fn from_ymd_hms_works() {
            let ts = Timestamp::from_ymd_hms(2026, 8, 7, 12, 0, 0).unwrap();
            assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());
        }

        #[test]
        fn from_ymd_hms_rejects_invalid_date() {
            assert!(Timestamp::from_ymd_hms(2026, 2, 30, 0, 0, 0).is_none());
        }
    }

    mod arithmetic {
        use super::*;

        #[test]
        fn add_secs_works() {
            let ts = Timestamp::from_secs(1000).unwrap();
            assert_eq!(ts.add_secs(60).timestamp_secs(), 1060);
        }

        #[test]
        fn sub_secs_works() {
            let ts = Timestamp::from_secs(1000).unwrap();
            assert_eq!(ts.sub_secs(60).timestamp_secs(), 940);
        }

        #[test]
        fn std_duration_ops() {
            let ts = Timestamp::from_secs(1000).unwrap();
            assert_eq!(
                (ts + std::time::Duration::from_secs(60)).timestamp_secs(),
                1060
            );
            assert_eq!(
                (ts - std::time::Duration::from_secs(60)).timestamp_secs(),
                940
            );
        }

        #[test]
        fn timestamp_difference() {
            let ts1 = Timestamp::from_secs(1000).unwrap();
            let ts2 = Timestamp::from_secs(1060).unwrap();
            assert_eq!((ts2 - ts1).as_secs(), 60);
        }
    }

    mod comparison {
        use super::*;

        #[test]
        fn is_expired_past_and_future() {
            assert!(Timestamp::from_secs(0).unwrap().is_expired());
            assert!(!Timestamp::now().add_secs(3600).is_expired());
        }

        #[test]
        fn ordering() {
            let ts1 = Timestamp::from_secs(1000).unwrap();
            let ts2 = Timestamp::from_secs(2000).unwrap();
            assert!(ts1.is_before(&ts2));
            assert!(ts2.is_after(&ts1));
            assert!(ts1 < ts2);
        }
    }

    mod calendar {
        use super::*;

        #[test]
        fn weekday_accessor() {
            // 2026-08-07 is a Friday.
            let ts = Timestamp::from_ymd_hms(2026, 8, 7, 10, 0, 0).unwrap();
            assert_eq!(ts.weekday(), Weekday::Fri);
        }

        #[test]
        fn time_of_day_accessor() {
            let ts = Timestamp::from_ymd_hms(2026, 8, 7, 19, 30, 15).unwrap();
            assert_eq!(
                ts.time_of_day(),
                NaiveTime::from_hms_opt(19, 30, 15).unwrap()
            );
        }
    }

    mod serde_roundtrip {
        use super::*;

        #[test]
        fn roundtrip() {
            let ts = Timestamp::from_millis(1704067200123).unwrap();
            let json = serde_json::to_string(&ts).unwrap();
            let deserialized: Timestamp = serde_json::from_str(&json).unwrap();
            assert_eq!(ts, deserialized);
        }
    }
}
