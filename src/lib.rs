//! # Delivery Pricing Engine
//!
//! A delivery-fee pricing engine that composes an ordered set of pluggable
//! pricing rules (base fee, distance bands, time/weather/demand surge,
//! special-day surge, promo, min/max caps) and reconciles the result against
//! an optional third-party delivery-quote provider.
//!
//! ## Architecture
//!
//! The crate follows a layered design:
//!
//! - [`domain`] - Entities, value objects, and domain errors. No I/O.
//! - [`application`] - The rule registry, the sequential evaluation pipeline,
//!   and the [`DeliveryFeeEngine`](application::services::fee_engine::DeliveryFeeEngine)
//!   entry point that orchestrates concurrent signal fetches.
//! - [`infrastructure`] - Ports and adapters: the read-only rate
//!   configuration store, cached weather/demand signal providers with a
//!   coalescing TTL cache, and the third-party courier quote aggregator.
//!
//! ## Control Flow
//!
//! ```text
//! PricingContext
//!     │
//!     ├── haversine distance (pickup → drop)
//!     ├── weather + demand signals (concurrent, cached, safe defaults)
//!     ├── third-party quote (concurrent, joined only at assembly)
//!     │
//!     ▼
//! rule pipeline (sequential, priority-ordered, per-rule failure isolation)
//!     │
//!     ▼
//! PricingResult { quote id, expiry, breakdown, surge multiplier, courier quote }
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use delivery_pricing::application::services::fee_engine::DeliveryFeeEngine;
//!
//! let result = engine.calculate_delivery_fee(&context).await?;
//! println!("{} (x{})", result.final_fee(), result.surge_multiplier());
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use domain::errors::{DomainResult, PricingError};
