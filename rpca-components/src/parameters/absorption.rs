//! Absorption Parameters
//!
//! Parameters for the electron-neutral collision frequency, the electron
//! gyrofrequency and the magnetoionic absorption coefficient.

use rpca_core::types::FloatValue;
use serde::{Deserialize, Serialize};

/// How the geomagnetic field strength for the gyrofrequency is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GyrofrequencyModel {
    /// Dipole falloff with altitude: $B = B_0 (R_E / (R_E + h))^3$
    Dipole,
    /// Surface field strength $B_0$ at every altitude
    Constant,
}

/// Parameters for the absorption calculation
///
/// The absorption coefficient at altitude $h$ and angular frequency $\omega$ is
///
/// $$k_{abs} = \frac{K}{\nu_{en}} C_{5/2}\left(\frac{\omega + \omega_e}{\nu_{en}}\right)$$
///
/// with collision frequency $\nu_{en} = c_\nu n \sqrt{T}$ and gyrofrequency
/// $\omega_e = e B / m_e$.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsorptionParameters {
    /// Field model used for the gyrofrequency
    /// default: dipole
    pub gyrofrequency: GyrofrequencyModel,

    /// Surface geomagnetic field strength ($B_0$)
    /// unit: T
    /// default: 5e-5
    pub surface_field_tesla: FloatValue,

    /// Mean Earth radius for the dipole falloff
    /// unit: km
    /// default: 6371.0
    pub earth_radius_km: FloatValue,

    /// Collision frequency coefficient ($c_\nu$)
    /// unit: cm^3 s^-1 K^-1/2
    /// default: 5.4e-10
    pub collision_coefficient: FloatValue,

    /// Absorption scale ($K$)
    /// unit: dB km^-1 cm^3 s^-1
    /// default: 1.15e5
    pub absorption_scale: FloatValue,

    /// Elementary charge
    /// unit: C
    /// default: 1.602e-19
    pub elementary_charge: FloatValue,

    /// Electron mass
    /// unit: kg
    /// default: 9.109e-31
    pub electron_mass: FloatValue,
}

impl Default for AbsorptionParameters {
    fn default() -> Self {
        Self {
            gyrofrequency: GyrofrequencyModel::Dipole,
            surface_field_tesla: 5e-5,
            earth_radius_km: 6371.0,
            collision_coefficient: 5.4e-10,
            absorption_scale: 1.15e5,
            elementary_charge: 1.602e-19,
            electron_mass: 9.109e-31,
        }
    }
}
