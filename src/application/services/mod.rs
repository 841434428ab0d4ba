//! # Application Services
//!
//! Orchestration of the pricing computation.
//!
//! - [`pipeline`]: sequential, failure-isolating rule evaluation
//! - [`fee_engine`]: the engine entry point coordinating concurrent signal
//!   fetches, the pipeline, and result assembly

pub mod fee_engine;
pub mod pipeline;

pub use fee_engine::{DeliveryFeeEngine, EngineConfig};
pub use pipeline::{PipelineOutcome, RulePipeline};
