//! # Weather Condition
//!
//! Weather classification used by the weather surge rule.
//!
//! The condition is fetched from an external provider; when the provider is
//! unavailable the engine substitutes [`WeatherCondition::Clear`] so that
//! external-signal unavailability never blocks fee computation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for enum parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {0} value: {1}")]
pub struct ParseEnumError(pub &'static str, pub String);

/// Current weather condition at a location.
///
/// Ordered roughly by severity; [`WeatherCondition::Clear`] is the safe
/// default substituted when the upstream provider fails.
///
/// # Examples
///
/// ```
/// use delivery_pricing::domain::value_objects::weather::WeatherCondition;
///
/// assert_eq!(WeatherCondition::default(), WeatherCondition::Clear);
/// assert_eq!("HEAVY_RAIN".parse(), Ok(WeatherCondition::HeavyRain));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherCondition {
    /// Clear skies. The safe default.
    #[default]
    Clear,
    /// Overcast.
    Cloudy,
    /// Light rain.
    LightRain,
    /// Heavy rain.
    HeavyRain,
    /// Storm.
    Storm,
    /// Extreme conditions (cyclone, hail, flooding).
    Extreme,
}

impl WeatherCondition {
    /// Returns true for conditions that typically slow deliveries down.
    #[inline]
    #[must_use]
    pub const fn is_adverse(self) -> bool {
        !matches!(self, Self::Clear | Self::Cloudy)
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear => write!(f, "CLEAR"),
            Self::Cloudy => write!(f, "CLOUDY"),
            Self::LightRain => write!(f, "LIGHT_RAIN"),
            Self::HeavyRain => write!(f, "HEAVY_RAIN"),
            Self::Storm => write!(f, "STORM"),
            Self::Extreme => write!(f, "EXTREME"),
        }
    }
}

impl FromStr for WeatherCondition {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CLEAR" => Ok(Self::Clear),
            "CLOUDY" => Ok(Self::Cloudy),
            "LIGHT_RAIN" => Ok(Self::LightRain),
            "HEAVY_RAIN" => Ok(Self::HeavyRain),
            "STORM" => Ok(Self::Storm),
            "EXTREME" => Ok(Self::Extreme),
            _ => Err(ParseEnumError("WeatherCondition", s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_clear() {
        assert_eq!(WeatherCondition::default(), WeatherCondition::Clear);
    }

    #[test]
    fn adverse_classification() {
        assert!(!WeatherCondition::Clear.is_adverse());
        assert!(!WeatherCondition::Cloudy.is_adverse());
        assert!(WeatherCondition::LightRain.is_adverse());
        assert!(WeatherCondition::Storm.is_adverse());
        assert!(WeatherCondition::Extreme.is_adverse());
    }

    #[test]
    fn parse_roundtrip() {
        for condition in [
            WeatherCondition::Clear,
            WeatherCondition::Cloudy,
            WeatherCondition::LightRain,
            WeatherCondition::HeavyRain,
            WeatherCondition::Storm,
            WeatherCondition::Extreme,
        ] {
            assert_eq!(condition.to_string().parse(), Ok(condition));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("storm".parse(), Ok(WeatherCondition::Storm));
    }

    #[test]
    fn parse_rejects_unknown() {
        let result: Result<WeatherCondition, _> = "DRIZZLE".parse();
        assert!(result.is_err());
    }
}
