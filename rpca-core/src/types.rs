use serde::{Deserialize, Serialize};

pub type FloatValue = f64;

/// Altitude on the model grid
/// unit: km
pub type Altitude = u32;

/// Coarse day/night annotation of a time step.
///
/// Only used to label output; the recombination regime is chosen per altitude
/// from the Earth-shadow height instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayNight {
    Day,
    Night,
}

impl DayNight {
    /// `Day` when the sun is above the horizon (SZA < 90°)
    pub fn from_solar_zenith_angle(sza_deg: FloatValue) -> Self {
        if sza_deg < 90.0 {
            DayNight::Day
        } else {
            DayNight::Night
        }
    }
}

impl std::fmt::Display for DayNight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayNight::Day => write!(f, "day"),
            DayNight::Night => write!(f, "night"),
        }
    }
}
