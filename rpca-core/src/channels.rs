//! Proton energy channels
//!
//! Each channel is a differential flux measurement over an energy band. The
//! model injects one representative proton per channel at the band midpoint.

use crate::types::FloatValue;
use serde::Serialize;

/// Number of energy channels
pub const N_CHANNELS: usize = 10;

/// One proton energy channel of the flux instrument
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyChannel {
    /// Position in [`ENERGY_CHANNELS`]
    pub index: usize,
    /// Name of the flux field this channel is read from
    pub flux_field: &'static str,
    /// unit: MeV
    pub lower_mev: FloatValue,
    /// unit: MeV
    pub upper_mev: FloatValue,
}

impl EnergyChannel {
    /// Band midpoint, used as the initial proton energy
    /// unit: MeV
    pub fn midpoint_mev(&self) -> FloatValue {
        (self.lower_mev + self.upper_mev) / 2.0
    }

    /// Look up a channel by its flux field name
    pub fn by_flux_field(name: &str) -> Option<&'static EnergyChannel> {
        ENERGY_CHANNELS.iter().find(|c| c.flux_field == name)
    }
}

// The instrument has no usable channel between p6 and p8, so the field names skip p7.
pub const ENERGY_CHANNELS: [EnergyChannel; N_CHANNELS] = [
    channel(0, "p1_fx", 0.29, 0.50),
    channel(1, "p2_fx", 0.50, 0.96),
    channel(2, "p3_fx", 0.96, 2.00),
    channel(3, "p4_fx", 2.00, 4.60),
    channel(4, "p5_fx", 4.60, 15.0),
    channel(5, "p6_fx", 15.0, 25.0),
    channel(6, "p8_fx", 25.0, 48.0),
    channel(7, "p9_fx", 48.0, 96.0),
    channel(8, "p10_fx", 96.0, 145.0),
    channel(9, "p11_fx", 145.0, 440.0),
];

const fn channel(
    index: usize,
    flux_field: &'static str,
    lower_mev: FloatValue,
    upper_mev: FloatValue,
) -> EnergyChannel {
    EnergyChannel {
        index,
        flux_field,
        lower_mev,
        upper_mev,
    }
}
