//! Time-step pipeline
//!
//! Chains the components for each flux observation:
//!
//! geometry → deposition → ionization → recombination → absorption
//!
//! Time steps carry no state between each other, so a series is processed as an
//! independent map over rows. The reference table and the components are
//! shared read-only between worker threads.

use crate::config::{PipelineConfig, RIOMETER_FREQUENCIES_MHZ};
use crate::output::{
    AbsorptionResult, EfficiencyProfile, ElectronDensityGrid, ElectronDensityRecord,
    IonizationRecord,
};
use rayon::prelude::*;
use rpca_components::absorption::AbsorptionModel;
use rpca_components::deposition::EnergyDepositionModel;
use rpca_components::geometry::GeometryModel;
use rpca_components::ionization::total_ionization;
use rpca_components::recombination::{RecombinationModel, RecombinationRegime};
use rpca_core::atmosphere::AtmosphereTable;
use rpca_core::channels::ENERGY_CHANNELS;
use rpca_core::errors::{RPCAError, RPCAResult};
use rpca_core::observation::FluxObservation;
use rpca_core::profile::{
    AltitudeProfile, ElectronDensityProfile, IonizationProfile, TotalIonization,
};
use rpca_core::types::{DayNight, FloatValue};
use serde::{Deserialize, Serialize};

/// Everything computed for a single flux observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStepResult {
    pub day_of_year: u32,
    pub year: i32,
    /// unit: degrees
    pub solar_zenith_angle: FloatValue,
    /// Reporting label, SZA < 90° is day
    pub mode: DayNight,
    /// unit: km
    pub shadow_height_km: FloatValue,
    pub ionization: IonizationProfile,
    pub total_ionization: TotalIonization,
    pub electron_density: ElectronDensityProfile,
    /// Recombination regime used at each altitude
    pub regimes: AltitudeProfile<RecombinationRegime>,
    /// One entry per configured frequency, in configuration order
    pub absorption: Vec<AbsorptionResult>,
}

impl TimeStepResult {
    pub fn electron_density_records(&self) -> impl Iterator<Item = ElectronDensityRecord> + '_ {
        self.electron_density
            .iter()
            .map(move |(altitude_km, ne)| ElectronDensityRecord {
                day_of_year: self.day_of_year,
                mode: self.mode,
                altitude_km,
                electron_density_cm3: *ne,
            })
    }

    pub fn ionization_records(&self) -> impl Iterator<Item = IonizationRecord> + '_ {
        self.ionization.iter().flat_map(move |(altitude_km, rates)| {
            let ne = self.electron_density.value_or_default(altitude_km);
            ENERGY_CHANNELS
                .iter()
                .zip(rates.iter())
                .map(move |(channel, q)| IonizationRecord {
                    day_of_year: self.day_of_year,
                    mode: self.mode,
                    altitude_km,
                    energy_mev: channel.midpoint_mev(),
                    q: *q,
                    electron_density_cm3: ne,
                })
        })
    }
}

/// A time step that could not be computed
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// Position of the observation in the input series
    pub row: usize,
    pub day_of_year: u32,
    pub error: RPCAError,
}

/// Result of running the pipeline over a series of observations
///
/// `steps` keeps the order of the input. Failed rows are left out of `steps` and
/// listed in `failures` instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    pub steps: Vec<TimeStepResult>,
    pub failures: Vec<RowFailure>,
}

impl PipelineOutput {
    /// Electron density keyed by `(day_of_year, altitude_km)`
    pub fn electron_density_table(&self) -> Vec<ElectronDensityRecord> {
        self.steps
            .iter()
            .flat_map(|step| step.electron_density_records())
            .collect()
    }

    /// Per-channel ionization keyed by `(day_of_year, altitude_km, energy_mev)`
    pub fn ionization_table(&self) -> Vec<IonizationRecord> {
        self.steps
            .iter()
            .flat_map(|step| step.ionization_records())
            .collect()
    }

    /// Absorption keyed by `(day_of_year, frequency_mhz)`
    pub fn absorption_table(&self) -> Vec<AbsorptionResult> {
        self.steps
            .iter()
            .flat_map(|step| step.absorption.iter().copied())
            .collect()
    }

    /// Electron density pivoted to an altitude × day grid
    pub fn electron_density_grid(&self) -> ElectronDensityGrid {
        ElectronDensityGrid::from_records(&self.electron_density_table())
    }
}

/// The polar cap absorption model
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    atmosphere: AtmosphereTable,
    geometry: GeometryModel,
    deposition: EnergyDepositionModel,
    recombination: RecombinationModel,
    absorption: AbsorptionModel,
}

impl Pipeline {
    /// Create a pipeline with the default configuration and the standard atmosphere
    pub fn new() -> Self {
        Self::build(PipelineConfig::default())
    }

    /// Create a pipeline from a configuration, validating it first
    pub fn from_config(config: PipelineConfig) -> RPCAResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PipelineConfig) -> Self {
        Self {
            atmosphere: AtmosphereTable::standard(),
            geometry: GeometryModel::from_parameters(config.geometry.clone()),
            deposition: EnergyDepositionModel::from_parameters(config.deposition.clone()),
            recombination: RecombinationModel::from_parameters(config.recombination.clone()),
            absorption: AbsorptionModel::from_parameters(config.absorption.clone()),
            config,
        }
    }

    /// Replace the reference atmosphere
    pub fn with_atmosphere(mut self, atmosphere: AtmosphereTable) -> Self {
        self.atmosphere = atmosphere;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn atmosphere(&self) -> &AtmosphereTable {
        &self.atmosphere
    }

    /// Compute a single time step
    ///
    /// # Errors
    /// Fails if the date or the solar geometry of the observation cannot be
    /// resolved. Numeric problems at individual altitudes do not fail the step;
    /// they show up as NaN cells.
    pub fn solve(&self, observation: &FluxObservation) -> RPCAResult<TimeStepResult> {
        let day_of_year = observation.day_of_year;
        let solar_zenith_angle = self
            .geometry
            .solar_zenith_angle(day_of_year, observation.year)?;
        let mode = DayNight::from_solar_zenith_angle(solar_zenith_angle);
        let shadow_height_km = self.geometry.earth_shadow_height(solar_zenith_angle);

        let ionization = self.deposition.deposit(observation, &self.atmosphere);
        let total_ionization = total_ionization(&ionization);
        let density = self.recombination.solve(&total_ionization, shadow_height_km);

        let absorption = self
            .config
            .frequencies_mhz
            .iter()
            .map(|&frequency_mhz| {
                let absorption_db = self.absorption.total_absorption(
                    &self.atmosphere,
                    &density.electron_density,
                    frequency_mhz,
                )?;
                Ok(AbsorptionResult {
                    day_of_year,
                    frequency_mhz,
                    absorption_db,
                })
            })
            .collect::<RPCAResult<Vec<_>>>()?;

        let night_cells = density
            .regimes
            .iter()
            .filter(|(_, r)| **r == RecombinationRegime::Night)
            .count();
        log::debug!(
            "Day {} ({}): SZA={:.2}°, {}, shadow={:.1} km, {} night-regime altitudes",
            day_of_year,
            observation.year,
            solar_zenith_angle,
            mode,
            shadow_height_km,
            night_cells
        );

        Ok(TimeStepResult {
            day_of_year,
            year: observation.year,
            solar_zenith_angle,
            mode,
            shadow_height_km,
            ionization,
            total_ionization,
            electron_density: density.electron_density,
            regimes: density.regimes,
            absorption,
        })
    }

    /// Compute every time step of a series
    ///
    /// A failing row is recorded and skipped; the rest of the series is still
    /// computed.
    pub fn run(&self, observations: &[FluxObservation]) -> PipelineOutput {
        let results: Vec<RPCAResult<TimeStepResult>> = if self.config.parallel {
            observations.par_iter().map(|obs| self.solve(obs)).collect()
        } else {
            observations.iter().map(|obs| self.solve(obs)).collect()
        };

        let mut output = PipelineOutput::default();
        for (row, (observation, result)) in observations.iter().zip(results).enumerate() {
            match result {
                Ok(step) => output.steps.push(step),
                Err(error) => {
                    log::warn!("Skipping row {}: {}", row, error);
                    output.failures.push(RowFailure {
                        row,
                        day_of_year: observation.day_of_year,
                        error,
                    });
                }
            }
        }

        log::debug!(
            "Processed {} observations, {} failed",
            observations.len(),
            output.failures.len()
        );
        output
    }

    /// Absorption coefficient profile at each riometer frequency
    pub fn efficiency_profiles(&self) -> Vec<EfficiencyProfile> {
        self.efficiency_profiles_at(&RIOMETER_FREQUENCIES_MHZ)
    }

    /// Absorption coefficient profile at each of the given frequencies
    pub fn efficiency_profiles_at(&self, frequencies_mhz: &[FloatValue]) -> Vec<EfficiencyProfile> {
        frequencies_mhz
            .iter()
            .map(|&frequency_mhz| EfficiencyProfile {
                frequency_mhz,
                coefficients: self
                    .absorption
                    .efficiency_profile(&self.atmosphere, frequency_mhz),
            })
            .collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
