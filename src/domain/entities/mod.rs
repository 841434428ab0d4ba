//! # Domain Entities
//!
//! Core aggregates of the pricing domain.
//!
//! - [`context::PricingContext`]: immutable pricing input
//! - [`result::PricingResult`]: final computation outcome
//! - [`quote::DeliveryQuote`]: third-party quote or failure marker
//! - [`rate_config`]: externally persisted rate tables

pub mod context;
pub mod quote;
pub mod rate_config;
pub mod result;

pub use context::{PricingContext, PricingContextBuilder};
pub use quote::DeliveryQuote;
pub use rate_config::{
    BaseFeeConfig, DemandSurge, DistanceRate, SpecialDaySurge, TimeSurge, WeatherSurge,
};
pub use result::PricingResult;
