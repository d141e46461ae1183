//! Energy Deposition Parameters
//!
//! Parameters for the proton stopping-power fit and the conversion from
//! deposited energy to ion pairs.

use rpca_core::types::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for proton energy degradation
///
/// The stopping power of air, per cm of equivalent sea-level air, is a power law
/// with a cubic correction in $L = \log_{10} E$:
///
/// $$\frac{dE}{dx} = S E^{\gamma} \left(1 + a_0 + a_1 L + a_2 L^2 + a_3 L^3\right)$$
///
/// with $E$ in MeV and $dE/dx$ in keV/cm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepositionParameters {
    /// Stopping power scale ($S$)
    /// unit: keV/cm
    /// default: 287.0
    pub stopping_power_scale: FloatValue,

    /// Power-law exponent ($\gamma$)
    /// unit: dimensionless
    /// default: -0.757
    pub stopping_power_exponent: FloatValue,

    /// Constant correction term ($a_0$)
    /// default: -0.0316
    pub correction_a0: FloatValue,

    /// Linear correction term ($a_1$)
    /// default: 0.229
    pub correction_a1: FloatValue,

    /// Quadratic correction term ($a_2$)
    /// default: -0.229
    pub correction_a2: FloatValue,

    /// Cubic correction term ($a_3$)
    /// default: 0.0907
    pub correction_a3: FloatValue,

    /// Conversion from deposited energy flux to ionization rate
    /// unit: ion pairs per MeV (scaled)
    /// default: 0.12
    pub ion_pairs_per_mev: FloatValue,
}

impl Default for DepositionParameters {
    fn default() -> Self {
        Self {
            stopping_power_scale: 287.0,
            stopping_power_exponent: -0.757,
            correction_a0: -0.0316,
            correction_a1: 0.229,
            correction_a2: -0.229,
            correction_a3: 0.0907,
            ion_pairs_per_mev: 0.12,
        }
    }
}

impl DepositionParameters {
    /// Logarithmic correction factor of the stopping-power fit
    ///
    /// $$1 + a_0 + a_1 L + a_2 L^2 + a_3 L^3$$
    pub fn correction(&self, log_energy: FloatValue) -> FloatValue {
        1.0 + (self.correction_a3 * log_energy.powf(3.0))
            + (self.correction_a2 * log_energy.powf(2.0))
            + (self.correction_a1 * log_energy)
            + self.correction_a0
    }
}
