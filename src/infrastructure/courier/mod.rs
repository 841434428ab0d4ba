//! # Third-Party Courier Integration
//!
//! Quote aggregation against an external delivery-logistics provider.
//!
//! - [`aggregator`]: the [`CourierQuoteProvider`] port and HTTP adapter
//! - [`wire`]: the provider's request/response contract
//! - [`http_client`]: shared reqwest wrapper with bounded timeouts
//! - [`error`]: the courier error family (never escapes the aggregator)

pub mod aggregator;
pub mod error;
pub mod http_client;
pub mod wire;

pub use aggregator::{CourierConfig, CourierQuoteProvider, HttpCourierQuoteProvider};
pub use error::{CourierError, CourierResult};
pub use wire::{QuoteRequest, QuoteResponse};
