//! Neutral atmosphere reference data on the fixed altitude grid
//!
//! The grid runs from 115 km down to 20 km in 5 km steps. Each altitude carries
//! a slab thickness, expressed as the equivalent thickness of sea-level air used
//! for proton energy loss, and the neutral temperature and number density used
//! for electron-neutral collision frequencies.
//!
//! Storage is a pair of fixed-size arrays indexed through [`altitude_index`], so
//! lookups in the inner loops are plain array indexing.
//!
//! # Examples
//!
//! ```rust
//! use rpca_core::atmosphere::{altitude_index, AtmosphereTable};
//!
//! let table = AtmosphereTable::standard();
//! assert_eq!(altitude_index(115), Some(0));
//!
//! let entry = table.neutral(100).unwrap();
//! assert_eq!(entry.temperature_k, 228.0);
//! ```

use crate::errors::{RPCAError, RPCAResult};
use crate::types::{Altitude, FloatValue};
use serde::{Deserialize, Serialize};

/// Number of altitudes on the model grid
pub const N_ALTITUDES: usize = 20;

/// Highest grid altitude, where protons enter the atmosphere
/// unit: km
pub const TOP_ALTITUDE_KM: Altitude = 115;

/// Lowest grid altitude
/// unit: km
pub const BOTTOM_ALTITUDE_KM: Altitude = 20;

/// Spacing between grid altitudes
/// unit: km
pub const ALTITUDE_STEP_KM: Altitude = 5;

/// Equivalent sea-level air thickness of each slab, top-down
/// unit: cm
const SLAB_THICKNESS_CM: [FloatValue; N_ALTITUDES] = [
    0.0122, 0.0247, 0.0533, 0.119, 0.286, 0.737, 1.94, 4.76, 10.6, 22.1, 43.5, 82.4, 152.0,
    278.0, 530.0, 1070.0, 2250.0, 4840.0, 10600.0, 23600.0,
];

/// Neutral temperature, top-down
/// unit: K
const NEUTRAL_TEMPERATURE_K: [FloatValue; N_ALTITUDES] = [
    380.6, 317.1, 265.5, 228.0, 203.5, 190.3, 183.8, 185.1, 195.0, 205.0, 216.2, 232.7, 249.3,
    263.9, 271.6, 267.7, 255.3, 241.5, 230.7, 221.7,
];

/// Neutral number density, top-down
/// unit: cm^-3
const NEUTRAL_DENSITY_CM3: [FloatValue; N_ALTITUDES] = [
    5.772e11, 1.076e12, 2.182e12, 4.768e12, 1.125e13, 2.808e13, 7.087e13, 1.736e14, 3.964e14,
    8.696e14, 1.822e15, 3.568e15, 6.669e15, 1.210e16, 2.198e16, 4.148e16, 8.265e16, 1.722e17,
    3.690e17, 8.111e17,
];

/// Map a grid altitude to its array index (0 is the top of the atmosphere)
///
/// Returns `None` for altitudes that are not on the grid.
pub fn altitude_index(altitude_km: Altitude) -> Option<usize> {
    if !(BOTTOM_ALTITUDE_KM..=TOP_ALTITUDE_KM).contains(&altitude_km) {
        return None;
    }
    let depth = TOP_ALTITUDE_KM - altitude_km;
    if depth % ALTITUDE_STEP_KM != 0 {
        return None;
    }
    Some((depth / ALTITUDE_STEP_KM) as usize)
}

/// Inverse of [`altitude_index`]
///
/// # Panics
/// Panics if `index >= N_ALTITUDES`.
pub fn altitude_at(index: usize) -> Altitude {
    assert!(index < N_ALTITUDES, "altitude index {} out of range", index);
    TOP_ALTITUDE_KM - (index as Altitude) * ALTITUDE_STEP_KM
}

/// All grid altitudes, top-down
pub fn altitudes() -> impl DoubleEndedIterator<Item = Altitude> + ExactSizeIterator {
    (0..N_ALTITUDES).map(altitude_at)
}

/// A horizontal atmospheric layer traversed by precipitating protons
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeSlab {
    /// unit: km
    pub altitude_km: Altitude,
    /// Equivalent sea-level air thickness
    /// unit: cm
    pub thickness_cm: FloatValue,
}

/// Neutral atmosphere state at one altitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeutralAtmosphereEntry {
    /// unit: km
    pub altitude_km: Altitude,
    /// unit: K
    pub temperature_k: FloatValue,
    /// unit: cm^-3
    pub density_cm3: FloatValue,
}

/// Immutable reference table for the whole altitude grid
///
/// Built once and shared by reference between the deposition and absorption
/// stages. Slabs are always ordered from the highest altitude to the lowest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereTable {
    slabs: [AltitudeSlab; N_ALTITUDES],
    neutral: [NeutralAtmosphereEntry; N_ALTITUDES],
}

impl Default for AtmosphereTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl AtmosphereTable {
    /// The standard polar atmosphere
    pub fn standard() -> Self {
        Self {
            slabs: std::array::from_fn(|i| AltitudeSlab {
                altitude_km: altitude_at(i),
                thickness_cm: SLAB_THICKNESS_CM[i],
            }),
            neutral: std::array::from_fn(|i| NeutralAtmosphereEntry {
                altitude_km: altitude_at(i),
                temperature_k: NEUTRAL_TEMPERATURE_K[i],
                density_cm3: NEUTRAL_DENSITY_CM3[i],
            }),
        }
    }

    /// Build a table from arbitrary entries
    ///
    /// Entries may be given in any order, but every grid altitude must appear
    /// exactly once in both `slabs` and `neutral`.
    pub fn new(slabs: &[AltitudeSlab], neutral: &[NeutralAtmosphereEntry]) -> RPCAResult<Self> {
        let slabs = Self::place(slabs, |s| s.altitude_km)?;
        let neutral = Self::place(neutral, |n| n.altitude_km)?;
        Ok(Self { slabs, neutral })
    }

    fn place<T: Copy>(
        entries: &[T],
        altitude_of: impl Fn(&T) -> Altitude,
    ) -> RPCAResult<[T; N_ALTITUDES]> {
        let mut placed: [Option<T>; N_ALTITUDES] = [None; N_ALTITUDES];
        for entry in entries {
            let altitude_km = altitude_of(entry);
            let index = altitude_index(altitude_km)
                .ok_or(RPCAError::MissingReferenceData { altitude_km })?;
            if placed[index].replace(*entry).is_some() {
                return Err(RPCAError::Error(format!(
                    "Duplicate reference entry for altitude {} km",
                    altitude_km
                )));
            }
        }

        let mut out = Vec::with_capacity(N_ALTITUDES);
        for (index, entry) in placed.iter().enumerate() {
            match entry {
                Some(entry) => out.push(*entry),
                None => {
                    return Err(RPCAError::MissingReferenceData {
                        altitude_km: altitude_at(index),
                    })
                }
            }
        }
        out.try_into()
            .map_err(|_| RPCAError::Error("Reference table has the wrong size".to_string()))
    }

    /// Slabs ordered from the top of the atmosphere downwards
    pub fn slabs(&self) -> &[AltitudeSlab] {
        &self.slabs
    }

    pub fn slab(&self, altitude_km: Altitude) -> Option<&AltitudeSlab> {
        altitude_index(altitude_km).map(|i| &self.slabs[i])
    }

    /// Neutral entries ordered from the top of the atmosphere downwards
    pub fn neutral_entries(&self) -> &[NeutralAtmosphereEntry] {
        &self.neutral
    }

    pub fn neutral(&self, altitude_km: Altitude) -> Option<&NeutralAtmosphereEntry> {
        altitude_index(altitude_km).map(|i| &self.neutral[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altitude_index_is_bijective() {
        for (i, altitude) in altitudes().enumerate() {
            assert_eq!(altitude_index(altitude), Some(i));
            assert_eq!(altitude_at(i), altitude);
        }
        assert_eq!(altitudes().len(), N_ALTITUDES);
    }

    #[test]
    fn test_off_grid_altitudes() {
        assert_eq!(altitude_index(120), None);
        assert_eq!(altitude_index(15), None);
        assert_eq!(altitude_index(102), None);
        assert_eq!(altitude_index(0), None);
    }

    #[test]
    fn test_grid_endpoints() {
        assert_eq!(altitudes().next(), Some(TOP_ALTITUDE_KM));
        assert_eq!(altitudes().next_back(), Some(BOTTOM_ALTITUDE_KM));
    }

    #[test]
    fn test_slabs_strictly_descending() {
        let table = AtmosphereTable::standard();
        for pair in table.slabs().windows(2) {
            assert!(pair[0].altitude_km > pair[1].altitude_km);
            assert_eq!(pair[0].altitude_km - pair[1].altitude_km, ALTITUDE_STEP_KM);
        }
    }

    #[test]
    fn test_standard_values_at_100km() {
        let table = AtmosphereTable::standard();
        let slab = table.slab(100).unwrap();
        let neutral = table.neutral(100).unwrap();
        assert_eq!(slab.thickness_cm, 0.119);
        assert_eq!(neutral.temperature_k, 228.0);
        assert_eq!(neutral.density_cm3, 4.768e12);
    }

    #[test]
    fn test_density_increases_downwards() {
        let table = AtmosphereTable::standard();
        for pair in table.neutral_entries().windows(2) {
            assert!(pair[1].density_cm3 > pair[0].density_cm3);
        }
    }

    #[test]
    fn test_new_accepts_any_order() {
        let standard = AtmosphereTable::standard();
        let mut slabs = standard.slabs().to_vec();
        let mut neutral = standard.neutral_entries().to_vec();
        slabs.reverse();
        neutral.reverse();

        let rebuilt = AtmosphereTable::new(&slabs, &neutral).unwrap();
        assert_eq!(rebuilt, standard);
    }

    #[test]
    fn test_new_rejects_missing_altitude() {
        let standard = AtmosphereTable::standard();
        let slabs = &standard.slabs()[1..];
        let result = AtmosphereTable::new(slabs, standard.neutral_entries());
        assert_eq!(
            result,
            Err(RPCAError::MissingReferenceData { altitude_km: 115 })
        );
    }

    #[test]
    fn test_new_rejects_off_grid_altitude() {
        let standard = AtmosphereTable::standard();
        let mut neutral = standard.neutral_entries().to_vec();
        neutral[3].altitude_km = 101;
        let result = AtmosphereTable::new(standard.slabs(), &neutral);
        assert_eq!(
            result,
            Err(RPCAError::MissingReferenceData { altitude_km: 101 })
        );
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let standard = AtmosphereTable::standard();
        let mut slabs = standard.slabs().to_vec();
        slabs.push(slabs[0]);
        assert!(AtmosphereTable::new(&slabs, standard.neutral_entries()).is_err());
    }
}
