//! # Base Fee Rule
//!
//! Seeds the running total with the configured base amount.
//!
//! Modeled as the first rule in the chain for uniformity: the pipeline
//! starts from zero and this rule emits a flat modification equal to the
//! active [`BaseFeeConfig`](crate::domain::entities::rate_config::BaseFeeConfig)
//! amount, so the base appears in the breakdown like every other charge.

use crate::application::rules::RuleInputs;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::modification::PriceModification;

/// The base delivery fee, emitted as the first breakdown entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseFeeRule;

impl BaseFeeRule {
    /// Stable rule name.
    pub const NAME: &'static str = "base_fee";
    /// Runs before everything else.
    pub const PRIORITY: u16 = 0;

    /// Always applies; a pricing computation without a base is impossible
    /// (the engine fails earlier with `ConfigNotFound`).
    #[must_use]
    pub fn applies(&self, _inputs: &RuleInputs<'_>) -> bool {
        true
    }

    /// Emits a flat modification equal to the configured base amount.
    ///
    /// # Errors
    ///
    /// Infallible in practice; typed for the uniform rule contract.
    pub fn calculate(&self, inputs: &RuleInputs<'_>) -> DomainResult<Option<PriceModification>> {
        Ok(Some(PriceModification::flat(
            Self::NAME,
            "base delivery fee",
            inputs.rates.base_fee().amount().get(),
            Self::PRIORITY,
        )))
    }
}
