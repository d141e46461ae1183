//! Solar Geometry Component
//!
//! Computes where the sun is relative to a polar observing site.
//!
//! # What This Component Does
//!
//! 1. Solar declination from the day of year
//! 2. Local solar time from the clock time of the observation plus the
//!    equation-of-time correction (no longitude correction at the pole)
//! 3. Hour angle and solar zenith angle (SZA)
//! 4. Earth-shadow height, used by the recombination component to decide
//!    which altitudes are in darkness
//!
//! # Differences from a general solar position algorithm
//!
//! - Observations are daily, so the clock time is the start of the day.
//! - The longitude correction is a fixed parameter, which is only exact where
//!   all meridians meet.

use crate::parameters::GeometryParameters;
use chrono::{Days, NaiveDate, NaiveDateTime, Timelike};
use rpca_core::errors::{RPCAError, RPCAResult};
use rpca_core::types::FloatValue;
use serde::{Deserialize, Serialize};

/// Day offset of the equation-of-time angle (spring equinox)
const EOT_DAY_OFFSET: FloatValue = 81.0;

/// Equation-of-time amplitudes
/// unit: minutes
const EOT_SIN_2B: FloatValue = 9.87;
const EOT_COS_B: FloatValue = 7.53;
const EOT_SIN_B: FloatValue = 1.5;

/// Solar geometry at a fixed observing site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryModel {
    parameters: GeometryParameters,
}

impl GeometryModel {
    /// Create a new geometry model with default parameters (south pole)
    pub fn new() -> Self {
        Self::from_parameters(GeometryParameters::default())
    }

    /// Create a new geometry model from parameters
    pub fn from_parameters(parameters: GeometryParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &GeometryParameters {
        &self.parameters
    }

    /// Solar declination
    ///
    /// $$\delta = 23.44° \sin\left(\frac{360°}{365}(d + 284)\right)$$
    ///
    /// unit: degrees
    pub fn solar_declination(&self, day_of_year: u32) -> FloatValue {
        let p = &self.parameters;
        let angle = 360.0 / p.days_per_year * (day_of_year as FloatValue + p.declination_day_offset);
        p.obliquity_deg * angle.to_radians().sin()
    }

    /// Equation of time
    ///
    /// $$EoT = 9.87 \sin 2B - 7.53 \cos B - 1.5 \sin B, \quad B = \frac{360°}{365}(d - 81)$$
    ///
    /// unit: minutes
    pub fn equation_of_time(&self, day_of_year: u32) -> FloatValue {
        let b = (360.0 / self.parameters.days_per_year) * (day_of_year as FloatValue - EOT_DAY_OFFSET);
        EOT_SIN_2B * (2.0 * b).to_radians().sin()
            - EOT_COS_B * b.to_radians().cos()
            - EOT_SIN_B * b.to_radians().sin()
    }

    /// Timestamp of an observation: the start of the given day
    ///
    /// Day 366 of a non-leap year rolls over into the next year.
    pub fn observation_time(&self, day_of_year: u32, year: i32) -> RPCAResult<NaiveDateTime> {
        let invalid = RPCAError::InvalidDate { day_of_year, year };
        if !(1..=366).contains(&day_of_year) {
            return Err(invalid);
        }
        NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|base| base.checked_add_days(Days::new(u64::from(day_of_year - 1))))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or(invalid)
    }

    /// Local solar time for a given clock time
    /// unit: hours
    pub fn local_solar_time(&self, day_of_year: u32, clock_hours: FloatValue) -> FloatValue {
        clock_hours
            + self.equation_of_time(day_of_year) / 60.0
            + self.parameters.longitude_correction_min / 60.0
    }

    /// Hour angle, zero at local solar noon
    /// unit: degrees
    pub fn hour_angle(local_solar_time: FloatValue) -> FloatValue {
        15.0 * (local_solar_time - 12.0)
    }

    /// Solar zenith angle at the start of a day
    ///
    /// unit: degrees, in [0, 180]
    pub fn solar_zenith_angle(&self, day_of_year: u32, year: i32) -> RPCAResult<FloatValue> {
        let time = self.observation_time(day_of_year, year)?;
        self.solar_zenith_angle_at(day_of_year, clock_hours(&time))
    }

    /// Solar zenith angle at a given clock time of a day
    ///
    /// $$\cos\chi = \sin\delta \sin\phi + \cos\delta \cos\phi \cos H$$
    ///
    /// `cos(SZA)` is clamped to [-1, 1] before the inverse cosine; a non-finite
    /// value is an [`RPCAError::InvalidGeometry`].
    pub fn solar_zenith_angle_at(
        &self,
        day_of_year: u32,
        clock_hours: FloatValue,
    ) -> RPCAResult<FloatValue> {
        let declination = self.solar_declination(day_of_year).to_radians();
        let latitude = self.parameters.latitude_deg.to_radians();
        let hour_angle = Self::hour_angle(self.local_solar_time(day_of_year, clock_hours)).to_radians();

        let cos_sza = declination.sin() * latitude.sin()
            + declination.cos() * latitude.cos() * hour_angle.cos();

        if !cos_sza.is_finite() {
            return Err(RPCAError::InvalidGeometry {
                day_of_year,
                cos_sza,
            });
        }
        if cos_sza.abs() > 1.0 {
            log::debug!(
                "Clamping cos(SZA)={} to [-1, 1] on day {}",
                cos_sza,
                day_of_year
            );
        }

        Ok(cos_sza.clamp(-1.0, 1.0).acos().to_degrees())
    }

    /// Height of the Earth's shadow above the surface
    ///
    /// $$h_{shadow} = R_E \left(\frac{1}{\cos\chi} - 1\right)$$
    ///
    /// unit: km
    pub fn earth_shadow_height(&self, sza_deg: FloatValue) -> FloatValue {
        self.parameters.earth_radius_km * (1.0 / sza_deg.to_radians().cos() - 1.0)
    }
}

impl Default for GeometryModel {
    fn default() -> Self {
        Self::new()
    }
}

fn clock_hours(time: &NaiveDateTime) -> FloatValue {
    time.hour() as FloatValue + time.minute() as FloatValue / 60.0 + time.second() as FloatValue / 3600.0
}
