//! Per-time-step proton flux input
//!
//! [`FluxObservation`] is the record every component consumes. [`FluxRecord`] mirrors
//! the column layout of the flux files so a tabular reader can deserialize rows
//! straight into it.

use crate::channels::{EnergyChannel, ENERGY_CHANNELS, N_CHANNELS};
use crate::types::FloatValue;
use serde::{Deserialize, Serialize};

/// One row of the proton flux time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxObservation {
    /// Day of year, 1-366
    pub day_of_year: u32,
    /// Calendar year, only used to resolve the date
    pub year: i32,
    /// Flux per energy channel, indexed like [`ENERGY_CHANNELS`]
    /// unit: counts/(sr cm^2 s MeV)
    pub flux_by_channel: [FloatValue; N_CHANNELS],
}

impl FluxObservation {
    pub fn new(day_of_year: u32, year: i32, flux_by_channel: [FloatValue; N_CHANNELS]) -> Self {
        Self {
            day_of_year,
            year,
            flux_by_channel: flux_by_channel.map(sanitise_flux),
        }
    }

    /// Build an observation from `(field name, flux)` pairs
    ///
    /// Unknown field names are ignored and channels without a field default to zero.
    pub fn from_named_fluxes<'a>(
        day_of_year: u32,
        year: i32,
        fluxes: impl IntoIterator<Item = (&'a str, FloatValue)>,
    ) -> Self {
        let mut flux_by_channel = [0.0; N_CHANNELS];
        for (name, value) in fluxes {
            match EnergyChannel::by_flux_field(name) {
                Some(channel) => flux_by_channel[channel.index] = value,
                None => log::trace!("Ignoring unknown flux field {}", name),
            }
        }
        Self::new(day_of_year, year, flux_by_channel)
    }

    pub fn flux(&self, channel: &EnergyChannel) -> FloatValue {
        self.flux_by_channel
            .get(channel.index)
            .copied()
            .unwrap_or(0.0)
    }

    /// `(midpoint energy, flux)` pairs in channel order
    pub fn spectrum(&self) -> Vec<(FloatValue, FloatValue)> {
        ENERGY_CHANNELS
            .iter()
            .map(|c| (c.midpoint_mev(), self.flux(c)))
            .collect()
    }
}

/// Missing values arrive as NaN from tabular sources and count as no flux.
fn sanitise_flux(value: FloatValue) -> FloatValue {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Row layout of the flux files
///
/// Absent columns default to zero flux.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluxRecord {
    pub doy: u32,
    /// Decimal year; truncated to the calendar year
    pub dec_year: FloatValue,
    pub p1_fx: Option<FloatValue>,
    pub p2_fx: Option<FloatValue>,
    pub p3_fx: Option<FloatValue>,
    pub p4_fx: Option<FloatValue>,
    pub p5_fx: Option<FloatValue>,
    pub p6_fx: Option<FloatValue>,
    pub p8_fx: Option<FloatValue>,
    pub p9_fx: Option<FloatValue>,
    pub p10_fx: Option<FloatValue>,
    pub p11_fx: Option<FloatValue>,
}

impl From<FluxRecord> for FluxObservation {
    fn from(record: FluxRecord) -> Self {
        let fluxes = [
            record.p1_fx,
            record.p2_fx,
            record.p3_fx,
            record.p4_fx,
            record.p5_fx,
            record.p6_fx,
            record.p8_fx,
            record.p9_fx,
            record.p10_fx,
            record.p11_fx,
        ];
        FluxObservation::new(
            record.doy,
            record.dec_year.trunc() as i32,
            fluxes.map(|f| f.unwrap_or(0.0)),
        )
    }
}
