//! # Distance Rule
//!
//! Per-km charge from the first matching distance band.
//!
//! Bands are half-open `[min_km, max_km)` and evaluated first-match-wins in
//! ascending `min_km` order. The matched band's rate applies to the whole
//! distance, not just the portion inside the band. A distance outside every
//! configured band gets no distance surcharge; that is a policy gap to
//! surface in configuration review, not an error.

use crate::application::rules::RuleInputs;
use crate::domain::entities::rate_config::DistanceRate;
use crate::domain::errors::{DomainResult, PricingError};
use crate::domain::value_objects::modification::PriceModification;

/// Flat `rate × distance` charge from the first matching active band.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceRule;

impl DistanceRule {
    /// Stable rule name.
    pub const NAME: &'static str = "distance";
    /// Runs right after the base fee.
    pub const PRIORITY: u16 = 10;

    fn matching_band<'a>(&self, inputs: &RuleInputs<'a>) -> Option<&'a DistanceRate> {
        inputs
            .rates
            .distance_rates()
            .iter()
            .find(|band| band.is_active() && band.contains(inputs.distance_km))
    }

    /// Applies when some active band contains the computed distance.
    #[must_use]
    pub fn applies(&self, inputs: &RuleInputs<'_>) -> bool {
        self.matching_band(inputs).is_some()
    }

    /// Emits `rate × distance` as a flat modification.
    ///
    /// # Errors
    ///
    /// Returns `CalculationFailed` on arithmetic overflow.
    pub fn calculate(&self, inputs: &RuleInputs<'_>) -> DomainResult<Option<PriceModification>> {
        let Some(band) = self.matching_band(inputs) else {
            return Ok(None);
        };

        let amount = band
            .rate_per_km()
            .checked_mul(inputs.distance_km)
            .ok_or_else(|| {
                PricingError::calculation_failed("distance surcharge overflowed")
            })?;

        Ok(Some(PriceModification::flat(
            Self::NAME,
            format!(
                "{} km in band [{}, {}) at {}/km",
                inputs.distance_km,
                band.min_km(),
                band.max_km(),
                band.rate_per_km()
            ),
            amount,
            Self::PRIORITY,
        )))
    }
}
