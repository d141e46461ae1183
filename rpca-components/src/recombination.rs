//! Recombination Component
//!
//! Converts ionization rate to equilibrium electron density
//!
//! $$n_e = \sqrt{q / \alpha_{eff}}$$
//!
//! using one of three empirical effective recombination coefficients.
//!
//! # Regime selection
//!
//! The regime is chosen separately at every altitude:
//!
//! 1. Above 85 km: high-altitude regime, independent of the sun
//! 2. Below the Earth-shadow height: night regime
//! 3. Otherwise: day regime
//!
//! This is finer than the day/night label of a time step (SZA < 90°), which is
//! only used to annotate output.

use crate::parameters::RecombinationParameters;
use rpca_core::errors::{RPCAError, RPCAResult};
use rpca_core::profile::{AltitudeProfile, ElectronDensityProfile, TotalIonization};
use rpca_core::types::{Altitude, FloatValue};
use serde::{Deserialize, Serialize};

/// Effective recombination regime at one altitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecombinationRegime {
    HighAltitude,
    Night,
    Day,
}

/// Electron density profile together with the regime used at each altitude
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensitySolution {
    pub electron_density: ElectronDensityProfile,
    pub regimes: AltitudeProfile<RecombinationRegime>,
}

/// Effective recombination model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecombinationModel {
    parameters: RecombinationParameters,
}

impl RecombinationModel {
    /// Create a new recombination model with default parameters
    pub fn new() -> Self {
        Self::from_parameters(RecombinationParameters::default())
    }

    /// Create a new recombination model from parameters
    pub fn from_parameters(parameters: RecombinationParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &RecombinationParameters {
        &self.parameters
    }

    /// Pick the regime for an altitude given the current Earth-shadow height
    pub fn select_regime(
        &self,
        altitude_km: FloatValue,
        shadow_height_km: FloatValue,
    ) -> RecombinationRegime {
        if altitude_km > self.parameters.high_altitude_threshold_km {
            RecombinationRegime::HighAltitude
        } else if altitude_km < shadow_height_km {
            RecombinationRegime::Night
        } else {
            RecombinationRegime::Day
        }
    }

    /// Effective recombination coefficient
    ///
    /// $$\alpha_{eff}(z) = A \exp(-k z)$$
    ///
    /// unit: cm^3 s^-1
    pub fn effective_coefficient(
        &self,
        regime: RecombinationRegime,
        altitude_km: FloatValue,
    ) -> FloatValue {
        let p = &self.parameters;
        let (scale, rate) = match regime {
            RecombinationRegime::HighAltitude => (p.high_scale, p.high_rate),
            RecombinationRegime::Night => (p.night_scale, p.night_rate),
            RecombinationRegime::Day => (p.day_scale, p.day_rate),
        };
        scale * (-rate * altitude_km).exp()
    }

    /// Equilibrium electron density for one altitude
    ///
    /// # Errors
    /// [`RPCAError::NumericDomain`] if `q_total` is negative or not finite, or if
    /// `alpha_eff` is not strictly positive.
    pub fn electron_density(
        &self,
        altitude_km: Altitude,
        q_total: FloatValue,
        alpha_eff: FloatValue,
    ) -> RPCAResult<FloatValue> {
        if !(q_total >= 0.0) || !q_total.is_finite() {
            return Err(RPCAError::NumericDomain {
                altitude_km,
                details: format!("ionization rate {} has no real square root", q_total),
            });
        }
        if !(alpha_eff > 0.0) || !alpha_eff.is_finite() {
            return Err(RPCAError::NumericDomain {
                altitude_km,
                details: format!("effective recombination coefficient is {}", alpha_eff),
            });
        }
        Ok((q_total / alpha_eff).sqrt())
    }

    /// Electron density at every altitude for one time step
    ///
    /// Altitudes where the density cannot be computed are set to NaN so the rest of
    /// the profile survives.
    pub fn solve(&self, total: &TotalIonization, shadow_height_km: FloatValue) -> DensitySolution {
        let cells = total.map(|altitude, q| {
            let z = altitude as FloatValue;
            let regime = self.select_regime(z, shadow_height_km);
            let alpha = self.effective_coefficient(regime, z);
            let density = self
                .electron_density(altitude, *q, alpha)
                .unwrap_or_else(|e| {
                    log::warn!("{}; using NaN", e);
                    FloatValue::NAN
                });
            (regime, density)
        });

        let regimes = cells.map(|_, (regime, _)| *regime);
        let electron_density = cells.map(|_, (_, density)| *density);

        DensitySolution {
            electron_density,
            regimes,
        }
    }
}

impl Default for RecombinationModel {
    fn default() -> Self {
        Self::new()
    }
}
