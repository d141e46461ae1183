//! Energy Deposition Component
//!
//! Follows one representative proton per energy channel down through the
//! altitude slabs and records the energy it leaves behind in each slab.
//!
//! # What This Component Does
//!
//! For each slab, from the top of the atmosphere downwards:
//!
//! 1. Evaluates the stopping power of air at the current proton energy
//! 2. Removes `min(E, dE/dx * thickness)` from the proton
//! 3. Converts the deposited energy times the channel flux to an ionization rate
//! 4. Stops once the proton has no energy left
//!
//! The recurrence is stateful in the remaining energy, so slabs must be
//! traversed in descending altitude order. Channels are independent: each
//! starts from its own midpoint energy.
//!
//! # Inputs
//!
//! - Flux per channel (counts/(sr cm^2 s MeV))
//! - Slab thickness in equivalent sea-level air (cm)
//!
//! # Outputs
//!
//! - Ionization rate per altitude and channel (ion pairs cm^-3 s^-1)

use crate::parameters::DepositionParameters;
use rpca_core::atmosphere::{AltitudeSlab, AtmosphereTable};
use rpca_core::channels::ENERGY_CHANNELS;
use rpca_core::observation::FluxObservation;
use rpca_core::profile::IonizationProfile;
use rpca_core::types::{Altitude, FloatValue};
use serde::{Deserialize, Serialize};

/// Energy left behind by a proton in one slab
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabDeposit {
    /// unit: km
    pub altitude_km: Altitude,
    /// unit: MeV
    pub energy_lost_mev: FloatValue,
    /// Energy remaining after the slab
    /// unit: MeV
    pub residual_energy_mev: FloatValue,
}

/// Path of a single proton through an ordered sequence of slabs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyDegradation {
    /// One entry per slab the proton reached, in traversal order
    pub deposits: Vec<SlabDeposit>,
}

impl EnergyDegradation {
    /// Altitude of the slab in which the proton came to rest
    pub fn stopping_altitude(&self) -> Option<Altitude> {
        self.deposits
            .last()
            .filter(|d| d.residual_energy_mev <= 0.0)
            .map(|d| d.altitude_km)
    }

    pub fn total_energy_lost(&self) -> FloatValue {
        self.deposits.iter().map(|d| d.energy_lost_mev).sum()
    }
}

/// Proton energy deposition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyDepositionModel {
    parameters: DepositionParameters,
}

impl EnergyDepositionModel {
    /// Create a new deposition model with default parameters
    pub fn new() -> Self {
        Self::from_parameters(DepositionParameters::default())
    }

    /// Create a new deposition model from parameters
    pub fn from_parameters(parameters: DepositionParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &DepositionParameters {
        &self.parameters
    }

    /// Stopping power of air at a given proton energy
    ///
    /// $$\frac{dE}{dx} = 287 E^{-0.757} \left(1 + a_0 + a_1 L + a_2 L^2 + a_3 L^3\right)$$
    ///
    /// unit: keV/cm
    pub fn energy_loss_rate(&self, energy_mev: FloatValue) -> FloatValue {
        let p = &self.parameters;
        let correction = p.correction(energy_mev.log10());
        p.stopping_power_scale * energy_mev.powf(p.stopping_power_exponent) * correction
    }

    /// Energy lost crossing a slab, never more than the proton carries
    ///
    /// Below the validity range of the fit the stopping power turns non-positive;
    /// the proton is then treated as stopping in this slab.
    ///
    /// unit: MeV
    pub fn energy_lost_in_slab(&self, energy_mev: FloatValue, thickness_cm: FloatValue) -> FloatValue {
        let rate = self.energy_loss_rate(energy_mev);
        if !(rate > 0.0) {
            return energy_mev;
        }
        // keV -> MeV
        (rate * thickness_cm.max(0.0) / 1000.0).min(energy_mev)
    }

    /// Degrade a proton through slabs ordered from the top down
    pub fn degrade(&self, initial_energy_mev: FloatValue, slabs: &[AltitudeSlab]) -> EnergyDegradation {
        let mut remaining = initial_energy_mev;
        let mut deposits = Vec::with_capacity(slabs.len());

        for slab in slabs {
            if remaining <= 0.0 {
                break;
            }
            let lost = self.energy_lost_in_slab(remaining, slab.thickness_cm);
            remaining -= lost;
            log::trace!(
                "Slab {} km: lost {:.4e} MeV, {:.4e} MeV remaining",
                slab.altitude_km,
                lost,
                remaining
            );
            deposits.push(SlabDeposit {
                altitude_km: slab.altitude_km,
                energy_lost_mev: lost,
                residual_energy_mev: remaining,
            });
        }

        EnergyDegradation { deposits }
    }

    /// Ionization rate produced by an energy deposit at a given flux
    pub fn ionization_rate(&self, energy_lost_mev: FloatValue, flux: FloatValue) -> FloatValue {
        self.parameters.ion_pairs_per_mev * (energy_lost_mev * flux)
    }

    /// Ionization rate per altitude and channel for one observation
    ///
    /// Channels with non-positive flux are skipped and contribute zero everywhere.
    /// Deposits at altitudes without a profile entry are dropped.
    pub fn deposit(
        &self,
        observation: &FluxObservation,
        atmosphere: &AtmosphereTable,
    ) -> IonizationProfile {
        let mut profile = IonizationProfile::default();

        for channel in ENERGY_CHANNELS.iter() {
            let flux = observation.flux(channel);
            if !(flux > 0.0) {
                log::trace!("Skipping channel {} with flux {}", channel.flux_field, flux);
                continue;
            }

            let degradation = self.degrade(channel.midpoint_mev(), atmosphere.slabs());
            for deposit in &degradation.deposits {
                match profile.get_mut(deposit.altitude_km) {
                    Some(rates) => {
                        rates[channel.index] = self.ionization_rate(deposit.energy_lost_mev, flux)
                    }
                    None => log::warn!(
                        "No profile entry for {} km; dropping channel {} deposit",
                        deposit.altitude_km,
                        channel.flux_field
                    ),
                }
            }
        }

        profile
    }
}

impl Default for EnergyDepositionModel {
    fn default() -> Self {
        Self::new()
    }
}
