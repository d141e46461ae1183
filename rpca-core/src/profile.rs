//! Values on the fixed altitude grid
//!
//! [`AltitudeProfile`] stores one value per grid altitude, top-down, using the
//! same indexing as the [`AtmosphereTable`](crate::atmosphere::AtmosphereTable).

use crate::atmosphere::{altitude_at, altitude_index, N_ALTITUDES};
use crate::channels::N_CHANNELS;
use crate::types::{Altitude, FloatValue};
use serde::{Deserialize, Serialize};

/// One value per grid altitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeProfile<T> {
    values: [T; N_ALTITUDES],
}

/// Ionization rate per altitude and energy channel
/// unit: ion pairs cm^-3 s^-1
pub type IonizationProfile = AltitudeProfile<[FloatValue; N_CHANNELS]>;

/// Channel-summed ionization rate per altitude
/// unit: ion pairs cm^-3 s^-1
pub type TotalIonization = AltitudeProfile<FloatValue>;

/// Equilibrium electron density per altitude
/// unit: cm^-3
pub type ElectronDensityProfile = AltitudeProfile<FloatValue>;

impl<T: Copy> AltitudeProfile<T> {
    pub fn filled(value: T) -> Self {
        Self {
            values: [value; N_ALTITUDES],
        }
    }
}

impl<T: Default> Default for AltitudeProfile<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> AltitudeProfile<T> {
    /// Build a profile by evaluating `f` at every grid altitude
    pub fn from_fn(mut f: impl FnMut(Altitude) -> T) -> Self {
        Self {
            values: std::array::from_fn(|i| f(altitude_at(i))),
        }
    }

    pub fn get(&self, altitude_km: Altitude) -> Option<&T> {
        altitude_index(altitude_km).map(|i| &self.values[i])
    }

    pub fn get_mut(&mut self, altitude_km: Altitude) -> Option<&mut T> {
        altitude_index(altitude_km).map(move |i| &mut self.values[i])
    }

    /// Values in storage order (top-down)
    pub fn values(&self) -> &[T; N_ALTITUDES] {
        &self.values
    }

    /// `(altitude, value)` pairs from the top of the atmosphere downwards
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Altitude, &T)> + ExactSizeIterator {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (altitude_at(i), v))
    }

    /// `(altitude, value)` pairs from the ground upwards
    pub fn ascending(&self) -> impl Iterator<Item = (Altitude, &T)> {
        self.iter().rev()
    }

    pub fn map<U>(&self, mut f: impl FnMut(Altitude, &T) -> U) -> AltitudeProfile<U> {
        AltitudeProfile {
            values: std::array::from_fn(|i| f(altitude_at(i), &self.values[i])),
        }
    }
}

impl<T: Copy + Default> AltitudeProfile<T> {
    /// Value at an altitude, or the default for altitudes off the grid
    pub fn value_or_default(&self, altitude_km: Altitude) -> T {
        self.get(altitude_km).copied().unwrap_or_default()
    }
}
