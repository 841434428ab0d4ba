//! # Geographic Location
//!
//! Validated coordinates and great-circle distance.
//!
//! This module provides the [`GeoPoint`] type for pickup and drop locations
//! together with the haversine distance used by the distance rule.
//!
//! # Examples
//!
//! ```
//! use delivery_pricing::domain::value_objects::location::GeoPoint;
//!
//! let pickup = GeoPoint::new(12.9716, 77.5946).unwrap();
//! let drop_off = GeoPoint::new(12.9352, 77.6245).unwrap();
//!
//! let distance = pickup.distance_km(&drop_off);
//! assert!(distance > 4.0 && distance < 7.0);
//! ```

use crate::domain::errors::{DomainResult, PricingError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair.
///
/// # Invariants
///
/// - Latitude in `[-90, 90]`
/// - Longitude in `[-180, 180]`
/// - Both finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    latitude: f64,
    /// Longitude in decimal degrees.
    longitude: f64,
}

impl GeoPoint {
    /// Creates a geographic point with validation.
    ///
    /// # Arguments
    ///
    /// * `latitude` - Decimal degrees in `[-90, 90]`
    /// * `longitude` - Decimal degrees in `[-180, 180]`
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidDistance`] if either coordinate is
    /// out of range or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use delivery_pricing::domain::value_objects::location::GeoPoint;
    ///
    /// assert!(GeoPoint::new(12.97, 77.59).is_ok());
    /// assert!(GeoPoint::new(91.0, 0.0).is_err());
    /// assert!(GeoPoint::new(0.0, -181.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(PricingError::invalid_distance(format!(
                "latitude {latitude} out of range [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(PricingError::invalid_distance(format!(
                "longitude {longitude} out of range [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in decimal degrees.
    #[inline]
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    #[inline]
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another point in kilometers.
    ///
    /// Haversine formula with mean Earth radius 6371 km. Identical points
    /// yield exactly `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use delivery_pricing::domain::value_objects::location::GeoPoint;
    ///
    /// let point = GeoPoint::new(12.97, 77.59).unwrap();
    /// assert_eq!(point.distance_km(&point), 0.0);
    /// ```
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        if self == other {
            return 0.0;
        }

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lng = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    /// Cache key with coordinates rounded to 2 decimal places.
    ///
    /// Points within roughly a kilometer of each other share a key, which
    /// is what lets concurrent weather lookups coalesce.
    ///
    /// # Examples
    ///
    /// ```
    /// use delivery_pricing::domain::value_objects::location::GeoPoint;
    ///
    /// let a = GeoPoint::new(12.9716, 77.5946).unwrap();
    /// let b = GeoPoint::new(12.9689, 77.5921).unwrap();
    /// assert_eq!(a.rounded_key(), b.rounded_key());
    /// ```
    #[must_use]
    pub fn rounded_key(&self) -> String {
        format!("{:.2},{:.2}", self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
