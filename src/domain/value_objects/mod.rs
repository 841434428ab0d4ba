//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`QuoteId`]: UUID-based quote identifier
//! - [`RestaurantId`], [`CustomerId`]: string-based identifiers
//!
//! ## Numeric Types
//!
//! - [`Money`]: non-negative decimal amount with checked arithmetic
//!
//! ## Domain Types
//!
//! - [`GeoPoint`]: validated coordinates with haversine distance
//! - [`WeatherCondition`]: weather classification with a safe default
//! - [`PriceModification`] / [`AppliedModification`]: the fee-adjustment
//!   algebra and its audit record
//! - [`Timestamp`]: UTC timestamp with expiry and calendar accessors

pub mod ids;
pub mod location;
pub mod modification;
pub mod money;
pub mod timestamp;
pub mod weather;

pub use ids::{CustomerId, QuoteId, RestaurantId};
pub use location::GeoPoint;
pub use modification::{AppliedModification, ModificationKind, PriceModification};
pub use money::{Money, MoneyError};
pub use timestamp::Timestamp;
pub use weather::WeatherCondition;
