use crate::types::{Altitude, FloatValue};
use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RPCAError {
    #[error("{0}")]
    Error(String),
    #[error("Invalid solar geometry on day {day_of_year}: cos(SZA)={cos_sza}")]
    InvalidGeometry {
        day_of_year: u32,
        cos_sza: FloatValue,
    },
    #[error("Day {day_of_year} of year {year} cannot be resolved to a calendar date")]
    InvalidDate { day_of_year: u32, year: i32 },
    #[error("Numeric domain error at {altitude_km} km: {details}")]
    NumericDomain {
        altitude_km: Altitude,
        details: String,
    },
    #[error("No reference data for altitude {altitude_km} km")]
    MissingReferenceData { altitude_km: Altitude },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience type for `Result<T, RPCAError>`.
pub type RPCAResult<T> = Result<T, RPCAError>;
