//! Pipeline configuration
//!
//! A [`PipelineConfig`] bundles the parameters of every component with the
//! run-level settings. It is built once, usually from TOML, and handed to
//! [`Pipeline::from_config`](crate::pipeline::Pipeline::from_config).
//!
//! Every field has a default, so a configuration file only needs the values it
//! changes:
//!
//! ```toml
//! frequencies_mhz = [20.5, 30.0, 38.2, 51.4]
//!
//! [geometry]
//! latitude_deg = 90.0
//!
//! [absorption]
//! gyrofrequency = "constant"
//! ```

use rpca_components::parameters::{
    AbsorptionParameters, DepositionParameters, GeometryParameters, RecombinationParameters,
};
use rpca_core::errors::{RPCAError, RPCAResult};
use rpca_core::types::FloatValue;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Riometer frequencies with measured absorption
/// unit: MHz
pub const RIOMETER_FREQUENCIES_MHZ: [FloatValue; 4] = [20.5, 30.0, 38.2, 51.4];

/// Configuration of a full pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Wave frequencies at which absorption is computed
    /// unit: MHz
    /// default: [30.0, 51.4]
    pub frequencies_mhz: Vec<FloatValue>,

    /// Process time steps on the rayon thread pool
    /// default: true
    pub parallel: bool,

    pub geometry: GeometryParameters,
    pub deposition: DepositionParameters,
    pub recombination: RecombinationParameters,
    pub absorption: AbsorptionParameters,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frequencies_mhz: vec![30.0, 51.4],
            parallel: true,
            geometry: GeometryParameters::default(),
            deposition: DepositionParameters::default(),
            recombination: RecombinationParameters::default(),
            absorption: AbsorptionParameters::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from a TOML document
    pub fn from_toml_str(contents: &str) -> RPCAResult<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| RPCAError::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> RPCAResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RPCAError::Config(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loading pipeline configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Serialise the configuration as TOML
    pub fn to_toml_string(&self) -> RPCAResult<String> {
        toml::to_string(self).map_err(|e| RPCAError::Config(e.to_string()))
    }

    /// Check the run-level settings
    ///
    /// Component parameters are not range-checked; they are empirical fits and
    /// any finite value is accepted.
    pub fn validate(&self) -> RPCAResult<()> {
        if self.frequencies_mhz.is_empty() {
            return Err(RPCAError::Config(
                "At least one frequency is required".to_string(),
            ));
        }
        if let Some(f) = self
            .frequencies_mhz
            .iter()
            .find(|f| !(f.is_finite() && **f > 0.0))
        {
            return Err(RPCAError::Config(format!(
                "Frequencies must be positive, got {} MHz",
                f
            )));
        }
        if !(-90.0..=90.0).contains(&self.geometry.latitude_deg) {
            return Err(RPCAError::Config(format!(
                "Latitude {} is outside [-90, 90]",
                self.geometry.latitude_deg
            )));
        }
        Ok(())
    }
}
