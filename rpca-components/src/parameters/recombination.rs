//! Recombination Parameters
//!
//! Empirical effective recombination coefficients for the three regimes of
//! the lower ionosphere.

use rpca_core::types::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for the effective recombination coefficient
///
/// Each regime uses an exponential profile in altitude $z$ (km):
///
/// $$\alpha_{eff}(z) = A \exp(-k z)$$
///
/// The high-altitude regime applies above `high_altitude_threshold_km`. Below it,
/// altitudes inside the Earth's shadow use the night regime and the rest use
/// the day regime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecombinationParameters {
    /// Altitude above which the high-altitude regime applies
    /// unit: km
    /// default: 85.0
    pub high_altitude_threshold_km: FloatValue,

    /// Day regime scale ($A_{day}$)
    /// unit: cm^3 s^-1
    /// default: 0.501
    pub day_scale: FloatValue,

    /// Day regime decay rate ($k_{day}$)
    /// unit: km^-1
    /// default: 0.165
    pub day_rate: FloatValue,

    /// Night regime scale ($A_{night}$)
    /// unit: cm^3 s^-1
    /// default: 652.0
    pub night_scale: FloatValue,

    /// Night regime decay rate ($k_{night}$)
    /// unit: km^-1
    /// default: 0.234
    pub night_rate: FloatValue,

    /// High-altitude regime scale ($A_{high}$)
    /// unit: cm^3 s^-1
    /// default: 2.5e-6
    pub high_scale: FloatValue,

    /// High-altitude regime decay rate ($k_{high}$)
    /// unit: km^-1
    /// default: 0.0195
    pub high_rate: FloatValue,
}

impl Default for RecombinationParameters {
    fn default() -> Self {
        Self {
            high_altitude_threshold_km: 85.0,
            day_scale: 0.501,
            day_rate: 0.165,
            night_scale: 652.0,
            night_rate: 0.234,
            high_scale: 2.5e-6,
            high_rate: 0.0195,
        }
    }
}
