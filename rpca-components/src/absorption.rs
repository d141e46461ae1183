//! Absorption Component
//!
//! Computes the HF radio absorption of a vertically propagating wave through the
//! disturbed D region.
//!
//! # What This Component Does
//!
//! 1. Electron-neutral collision frequency from the neutral atmosphere:
//!    $\nu_{en} = 5.4 \times 10^{-10} \, n \sqrt{T}$
//! 2. Electron gyrofrequency $\omega_e = e B / m_e$
//! 3. Magnetoionic correction $C_{5/2}(x)$ at $x = (\omega + \omega_e) / \nu_{en}$
//! 4. Absorption coefficient $k_{abs} = (1.15 \times 10^5 / \nu_{en}) \, C_{5/2}(x)$
//! 5. Total absorption $A = \int n_e(h) \, k_{abs}(h) \, dh$ over the altitude grid
//!
//! # Differences from the full magnetoionic theory
//!
//! - $C_{5/2}$ is evaluated with a fixed rational approximation, not by quadrature.
//! - Only one magnetoionic mode is considered (the $\omega + \omega_e$ branch).

use crate::parameters::{AbsorptionParameters, GyrofrequencyModel};
use rpca_core::atmosphere::{AtmosphereTable, NeutralAtmosphereEntry};
use rpca_core::errors::{RPCAError, RPCAResult};
use rpca_core::profile::{AltitudeProfile, ElectronDensityProfile};
use rpca_core::types::{Altitude, FloatValue};
use rpca_core::utils::integrate::trapezoid;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Numerator coefficients of the $C_{5/2}$ approximation ($a_0, a_1, a_2$)
const C52_NUMERATOR: [FloatValue; 3] = [1.1630641, 16.901002, 6.6945939];

/// Denominator coefficients of the $C_{5/2}$ approximation ($b_0 \ldots b_4$)
const C52_DENOMINATOR: [FloatValue; 5] = [4.3605732, 64.093464, 68.920505, 35.355257, 6.6314497];

/// Rational approximation of the semiconductor integral $C_{5/2}(x)$
///
/// $$C_{5/2}(x) \approx \frac{x^3 + a_2 x^2 + a_1 x + a_0}{x^5 + b_4 x^4 + b_3 x^3 + b_2 x^2 + b_1 x + b_0}$$
pub fn magnetoionic_integral(x: FloatValue) -> FloatValue {
    let [a0, a1, a2] = C52_NUMERATOR;
    let [b0, b1, b2, b3, b4] = C52_DENOMINATOR;
    let numerator = x.powf(3.0) + (a2 * x.powf(2.0)) + (a1 * x) + a0;
    let denominator =
        x.powf(5.0) + (b4 * x.powf(4.0)) + (b3 * x.powf(3.0)) + (b2 * x.powf(2.0)) + (b1 * x) + b0;
    numerator / denominator
}

/// Magnetoionic absorption model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsorptionModel {
    parameters: AbsorptionParameters,
}

impl AbsorptionModel {
    /// Create a new absorption model with default parameters
    pub fn new() -> Self {
        Self::from_parameters(AbsorptionParameters::default())
    }

    /// Create a new absorption model from parameters
    pub fn from_parameters(parameters: AbsorptionParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &AbsorptionParameters {
        &self.parameters
    }

    /// Electron-neutral collision frequency
    /// unit: s^-1
    pub fn collision_frequency(&self, neutral: &NeutralAtmosphereEntry) -> FloatValue {
        self.parameters.collision_coefficient * neutral.density_cm3 * neutral.temperature_k.sqrt()
    }

    /// Geomagnetic field strength at an altitude
    /// unit: T
    pub fn field_strength(&self, altitude_km: FloatValue) -> FloatValue {
        let p = &self.parameters;
        match p.gyrofrequency {
            GyrofrequencyModel::Dipole => {
                let r = p.earth_radius_km + altitude_km;
                p.surface_field_tesla * (p.earth_radius_km / r).powf(3.0)
            }
            GyrofrequencyModel::Constant => p.surface_field_tesla,
        }
    }

    /// Electron gyrofrequency
    /// unit: rad/s
    pub fn gyrofrequency(&self, altitude_km: FloatValue) -> FloatValue {
        (self.parameters.elementary_charge * self.field_strength(altitude_km))
            / self.parameters.electron_mass
    }

    /// Absorption coefficient at one altitude
    ///
    /// unit: dB km^-1 per electron cm^-3
    ///
    /// # Errors
    /// [`RPCAError::NumericDomain`] if the collision frequency is not strictly positive.
    pub fn absorption_coefficient(
        &self,
        neutral: &NeutralAtmosphereEntry,
        frequency_mhz: FloatValue,
    ) -> RPCAResult<FloatValue> {
        let nu_en = self.collision_frequency(neutral);
        if !(nu_en > 0.0) || !nu_en.is_finite() {
            return Err(RPCAError::NumericDomain {
                altitude_km: neutral.altitude_km,
                details: format!("collision frequency is {}", nu_en),
            });
        }

        let omega = 2.0 * PI * (frequency_mhz * 1e6);
        let omega_e = self.gyrofrequency(neutral.altitude_km as FloatValue);
        let x = (omega + omega_e) / nu_en;
        Ok((self.parameters.absorption_scale / nu_en) * magnetoionic_integral(x))
    }

    /// Absorption coefficient at every altitude
    ///
    /// NaN where it cannot be computed, zero where the atmosphere has no entry.
    pub fn efficiency_profile(
        &self,
        atmosphere: &AtmosphereTable,
        frequency_mhz: FloatValue,
    ) -> AltitudeProfile<FloatValue> {
        AltitudeProfile::from_fn(|altitude| self.coefficient_at(atmosphere, altitude, frequency_mhz))
    }

    /// Missing reference data contributes nothing; a domain error gives NaN.
    fn coefficient_at(
        &self,
        atmosphere: &AtmosphereTable,
        altitude_km: Altitude,
        frequency_mhz: FloatValue,
    ) -> FloatValue {
        let Some(neutral) = atmosphere.neutral(altitude_km) else {
            log::warn!(
                "{}; using zero",
                RPCAError::MissingReferenceData { altitude_km }
            );
            return 0.0;
        };
        self.absorption_coefficient(neutral, frequency_mhz)
            .unwrap_or_else(|e| {
                log::warn!("{}; using NaN", e);
                FloatValue::NAN
            })
    }

    /// Total absorption at one frequency
    ///
    /// Integrates $n_e k_{abs}$ over altitude with the trapezoidal rule, from the
    /// lowest altitude upwards.
    ///
    /// unit: dB
    pub fn total_absorption(
        &self,
        atmosphere: &AtmosphereTable,
        electron_density: &ElectronDensityProfile,
        frequency_mhz: FloatValue,
    ) -> RPCAResult<FloatValue> {
        let (heights, integrand): (Vec<FloatValue>, Vec<FloatValue>) = electron_density
            .ascending()
            .map(|(altitude, ne)| {
                let k_abs = self.coefficient_at(atmosphere, altitude, frequency_mhz);
                (altitude as FloatValue, ne * k_abs)
            })
            .unzip();

        trapezoid(&heights, &integrand)
    }
}

impl Default for AbsorptionModel {
    fn default() -> Self {
        Self::new()
    }
}
