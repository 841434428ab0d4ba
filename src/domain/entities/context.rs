//! # Pricing Context
//!
//! The immutable input to a pricing computation.
//!
//! A [`PricingContext`] is built once per request through
//! [`PricingContextBuilder`] and shared read-only by every rule in the
//! pipeline.
//!
//! # Examples
//!
//! ```
//! use delivery_pricing::domain::entities::context::PricingContextBuilder;
//! use delivery_pricing::domain::value_objects::{GeoPoint, Money, RestaurantId};
//! use rust_decimal::Decimal;
//!
//! let context = PricingContextBuilder::new(
//!     GeoPoint::new(12.9716, 77.5946).unwrap(),
//!     GeoPoint::new(12.9352, 77.6245).unwrap(),
//!     RestaurantId::new("rest-042"),
//!     Money::new(Decimal::new(450, 0)).unwrap(),
//! )
//! .city("Bengaluru")
//! .pickup_postal_code("560001")
//! .drop_postal_code("560034")
//! .promo_code("WELCOME10")
//! .build();
//!
//! assert_eq!(context.city(), "Bengaluru");
//! ```

use crate::domain::value_objects::ids::{CustomerId, RestaurantId};
use crate::domain::value_objects::location::GeoPoint;
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable input for one delivery-fee computation.
///
/// # Invariants
///
/// - Coordinates are validated at `GeoPoint` construction
/// - Order subtotal is non-negative (`Money` invariant)
/// - Immutable once built; rules read, never write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingContext {
    /// Pickup location (restaurant).
    pickup: GeoPoint,
    /// Drop location (customer).
    drop_off: GeoPoint,
    /// Pickup postal code.
    pickup_postal_code: String,
    /// Drop postal code.
    drop_postal_code: String,
    /// City the delivery happens in.
    city: String,
    /// Order subtotal before delivery fees.
    order_subtotal: Money,
    /// Optional order weight in grams.
    order_weight_grams: Option<u32>,
    /// Restaurant the order originates from.
    restaurant_id: RestaurantId,
    /// Optional customer identity.
    customer_id: Option<CustomerId>,
    /// Optional promo code supplied with the order.
    promo_code: Option<String>,
    /// When the computation is evaluated.
    requested_at: Timestamp,
}

impl PricingContext {
    /// Returns the pickup location.
    #[inline]
    #[must_use]
    pub const fn pickup(&self) -> &GeoPoint {
        &self.pickup
    }

    /// Returns the drop location.
    #[inline]
    #[must_use]
    pub const fn drop_off(&self) -> &GeoPoint {
        &self.drop_off
    }

    /// Returns the pickup postal code.
    #[inline]
    #[must_use]
    pub fn pickup_postal_code(&self) -> &str {
        &self.pickup_postal_code
    }

    /// Returns the drop postal code.
    #[inline]
    #[must_use]
    pub fn drop_postal_code(&self) -> &str {
        &self.drop_postal_code
    }

    /// Returns the city.
    #[inline]
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the order subtotal.
    #[inline]
    #[must_use]
    pub const fn order_subtotal(&self) -> Money {
        self.order_subtotal
    }

    /// Returns the order weight in grams, if known.
    #[inline]
    #[must_use]
    pub const fn order_weight_grams(&self) -> Option<u32> {
        self.order_weight_grams
    }

    /// Returns the restaurant identifier.
    #[inline]
    #[must_use]
    pub const fn restaurant_id(&self) -> &RestaurantId {
        &self.restaurant_id
    }

    /// Returns the customer identifier, if known.
    #[inline]
    #[must_use]
    pub const fn customer_id(&self) -> Option<&CustomerId> {
        self.customer_id.as_ref()
    }

    /// Returns the promo code, if supplied.
    #[inline]
    #[must_use]
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    /// Returns the evaluation timestamp.
    #[inline]
    #[must_use]
    pub const fn requested_at(&self) -> Timestamp {
        self.requested_at
    }
}

impl fmt::Display for PricingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PricingContext({} -> {} in {}, subtotal {})",
            self.pickup, self.drop_off, self.city, self.order_subtotal
        )
    }
}

/// Builder for [`PricingContext`].
///
/// Required inputs go through `new`; everything else has a sensible default
/// (empty postal codes and city, evaluation time of "now").
#[derive(Debug, Clone)]
pub struct PricingContextBuilder {
    pickup: GeoPoint,
    drop_off: GeoPoint,
    pickup_postal_code: String,
    drop_postal_code: String,
    city: String,
    order_subtotal: Money,
    order_weight_grams: Option<u32>,
    restaurant_id: RestaurantId,
    customer_id: Option<CustomerId>,
    promo_code: Option<String>,
    requested_at: Timestamp,
}

impl PricingContextBuilder {
    /// Starts a builder from the required inputs.
    #[must_use]
    pub fn new(
        pickup: GeoPoint,
        drop_off: GeoPoint,
        restaurant_id: RestaurantId,
        order_subtotal: Money,
    ) -> Self {
        Self {
            pickup,
            drop_off,
            pickup_postal_code: String::new(),
            drop_postal_code: String::new(),
            city: String::new(),
            order_subtotal,
            order_weight_grams: None,
            restaurant_id,
            customer_id: None,
            promo_code: None,
            requested_at: Timestamp::now(),
        }
    }

    /// Sets the pickup postal code.
    #[must_use]
    pub fn pickup_postal_code(mut self, code: impl Into<String>) -> Self {
        self.pickup_postal_code = code.into();
        self
    }

    /// Sets the drop postal code.
    #[must_use]
    pub fn drop_postal_code(mut self, code: impl Into<String>) -> Self {
        self.drop_postal_code = code.into();
        self
    }

    /// Sets the city.
    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Sets the order weight in grams.
    #[must_use]
    pub fn order_weight_grams(mut self, grams: u32) -> Self {
        self.order_weight_grams = Some(grams);
        self
    }

    /// Sets the customer identifier.
    #[must_use]
    pub fn customer_id(mut self, id: CustomerId) -> Self {
        self.customer_id = Some(id);
        self
    }

    /// Sets the promo code.
    #[must_use]
    pub fn promo_code(mut self, code: impl Into<String>) -> Self {
        self.promo_code = Some(code.into());
        self
    }

    /// Sets the evaluation timestamp. Defaults to now.
    #[must_use]
    pub fn requested_at(mut self, at: Timestamp) -> Self {
        self.requested_at = at;
        self
    }

    /// Builds the immutable context.
    #[must_use]
    pub fn build(self) -> PricingContext {
        PricingContext {
            pickup: self.pickup,
            drop_off: self.drop_off,
            pickup_postal_code: self.pickup_postal_code,
            drop_postal_code: self.drop_postal_code,
            city: self.city,
            order_subtotal: self.order_subtotal,
            order_weight_grams: self.order_weight_grams,
            restaurant_id: self.restaurant_id,
            customer_id: self.customer_id,
            promo_code: self.promo_code,
            requested_at: self.requested_at,
        }
    }
}
