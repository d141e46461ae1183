//! Solar Geometry Parameters
//!
//! Parameters for the solar declination, solar zenith angle and Earth-shadow
//! height at the observing site.

use rpca_core::types::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for the solar geometry calculation
///
/// The declination follows the Cooper approximation:
///
/// $$\delta = \varepsilon \sin\left(\frac{360°}{N} (d + d_0)\right)$$
///
/// The zenith angle is then
///
/// $$\cos\chi = \sin\delta \sin\phi + \cos\delta \cos\phi \cos H$$
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParameters {
    /// Geographic latitude of the observing site, negative in the southern hemisphere
    /// unit: degrees
    /// default: -90.0
    pub latitude_deg: FloatValue,

    /// Obliquity of the ecliptic (peak declination, $\varepsilon$)
    /// unit: degrees
    /// default: 23.44
    pub obliquity_deg: FloatValue,

    /// Day offset in the declination formula ($d_0$)
    /// unit: days
    /// default: 284.0
    pub declination_day_offset: FloatValue,

    /// Length of the year used by the declination and equation-of-time formulas ($N$)
    /// unit: days
    /// default: 365.0
    pub days_per_year: FloatValue,

    /// Longitude correction to local solar time
    /// Zero is only meaningful at the poles, where every meridian meets.
    /// unit: minutes
    /// default: 0.0
    pub longitude_correction_min: FloatValue,

    /// Mean Earth radius, used for the Earth-shadow height
    /// unit: km
    /// default: 6371.0
    pub earth_radius_km: FloatValue,
}

impl Default for GeometryParameters {
    fn default() -> Self {
        Self {
            latitude_deg: -90.0,
            obliquity_deg: 23.44,
            declination_day_offset: 284.0,
            days_per_year: 365.0,
            longitude_correction_min: 0.0,
            earth_radius_km: 6371.0,
        }
    }
}
