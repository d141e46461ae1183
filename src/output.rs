//! Tabular output of a pipeline run
//!
//! The records here are flat, serde-serialisable rows. They are what a caller
//! writes to disk or plots; the pipeline itself never touches the filesystem.

use ndarray::Array2;
use rpca_core::profile::AltitudeProfile;
use rpca_core::types::{Altitude, DayNight, FloatValue};
use serde::{Deserialize, Serialize};

/// Total absorption for one time step and frequency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsorptionResult {
    pub day_of_year: u32,
    /// unit: MHz
    pub frequency_mhz: FloatValue,
    /// NaN when a cell of the integrand could not be computed
    /// unit: dB
    pub absorption_db: FloatValue,
}

/// Electron density at one altitude of one time step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectronDensityRecord {
    pub day_of_year: u32,
    pub mode: DayNight,
    /// unit: km
    pub altitude_km: Altitude,
    /// unit: cm^-3
    pub electron_density_cm3: FloatValue,
}

/// Ionization rate contributed by one energy channel at one altitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IonizationRecord {
    pub day_of_year: u32,
    pub mode: DayNight,
    /// unit: km
    pub altitude_km: Altitude,
    /// Channel midpoint energy
    /// unit: MeV
    pub energy_mev: FloatValue,
    /// unit: ion pairs cm^-3 s^-1
    pub q: FloatValue,
    /// Electron density from the total ionization at this altitude
    /// unit: cm^-3
    pub electron_density_cm3: FloatValue,
}

/// Absorption coefficient profile at one frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyProfile {
    /// unit: MHz
    pub frequency_mhz: FloatValue,
    /// unit: dB km^-1 per electron cm^-3
    pub coefficients: AltitudeProfile<FloatValue>,
}

/// Electron density on a regular altitude × day grid
///
/// Rows are altitudes in ascending order, columns are days in ascending order.
/// Cells without a record are NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectronDensityGrid {
    altitudes_km: Vec<Altitude>,
    days: Vec<u32>,
    values: Array2<FloatValue>,
}

impl ElectronDensityGrid {
    /// Pivot electron density records into a grid
    ///
    /// When several records share a `(day, altitude)` cell the last one wins.
    pub fn from_records(records: &[ElectronDensityRecord]) -> Self {
        let mut altitudes_km: Vec<Altitude> = records.iter().map(|r| r.altitude_km).collect();
        altitudes_km.sort_unstable();
        altitudes_km.dedup();

        let mut days: Vec<u32> = records.iter().map(|r| r.day_of_year).collect();
        days.sort_unstable();
        days.dedup();

        let mut values = Array2::from_elem((altitudes_km.len(), days.len()), FloatValue::NAN);
        for record in records {
            // Both searches succeed: the axes were built from these records
            if let (Ok(row), Ok(col)) = (
                altitudes_km.binary_search(&record.altitude_km),
                days.binary_search(&record.day_of_year),
            ) {
                values[[row, col]] = record.electron_density_cm3;
            }
        }

        Self {
            altitudes_km,
            days,
            values,
        }
    }

    pub fn altitudes_km(&self) -> &[Altitude] {
        &self.altitudes_km
    }

    pub fn days(&self) -> &[u32] {
        &self.days
    }

    pub fn values(&self) -> &Array2<FloatValue> {
        &self.values
    }

    /// Value of one cell, `None` if the altitude or day is not on the grid
    pub fn get(&self, altitude_km: Altitude, day_of_year: u32) -> Option<FloatValue> {
        let row = self.altitudes_km.binary_search(&altitude_km).ok()?;
        let col = self.days.binary_search(&day_of_year).ok()?;
        Some(self.values[[row, col]])
    }

    /// Base-10 logarithm of every cell, NaN where the density is not positive
    pub fn log10(&self) -> Array2<FloatValue> {
        self.values
            .mapv(|v| if v > 0.0 { v.log10() } else { FloatValue::NAN })
    }
}

/// Mean absorption per frequency over a set of results
///
/// NaN results are skipped. A frequency with no finite result maps to NaN.
/// Frequencies are returned in order of first appearance.
pub fn mean_absorption_by_frequency(
    results: &[AbsorptionResult],
) -> Vec<(FloatValue, FloatValue)> {
    let mut sums: Vec<(FloatValue, FloatValue, usize)> = Vec::new();
    for result in results {
        let index = match sums
            .iter()
            .position(|(f, _, _)| *f == result.frequency_mhz)
        {
            Some(index) => index,
            None => {
                sums.push((result.frequency_mhz, 0.0, 0));
                sums.len() - 1
            }
        };
        if !result.absorption_db.is_nan() {
            sums[index].1 += result.absorption_db;
            sums[index].2 += 1;
        }
    }

    sums.into_iter()
        .map(|(frequency, total, count)| {
            let mean = if count > 0 {
                total / count as FloatValue
            } else {
                FloatValue::NAN
            };
            (frequency, mean)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn density(day_of_year: u32, altitude_km: Altitude, value: FloatValue) -> ElectronDensityRecord {
        ElectronDensityRecord {
            day_of_year,
            mode: DayNight::Day,
            altitude_km,
            electron_density_cm3: value,
        }
    }

    fn absorption(day_of_year: u32, frequency_mhz: FloatValue, value: FloatValue) -> AbsorptionResult {
        AbsorptionResult {
            day_of_year,
            frequency_mhz,
            absorption_db: value,
        }
    }

    // ===== Grid Tests =====

    #[test]
    fn test_grid_axes_are_sorted() {
        let records = vec![
            density(12, 60, 1.0),
            density(10, 115, 2.0),
            density(12, 20, 3.0),
            density(10, 60, 4.0),
        ];
        let grid = ElectronDensityGrid::from_records(&records);

        assert_eq!(grid.altitudes_km(), &[20, 60, 115]);
        assert_eq!(grid.days(), &[10, 12]);
        assert_eq!(grid.values().dim(), (3, 2));
        assert_eq!(grid.get(60, 12), Some(1.0));
        assert_eq!(grid.get(60, 10), Some(4.0));
        assert_eq!(grid.get(115, 10), Some(2.0));
    }

    #[test]
    fn test_grid_missing_cells_are_nan() {
        let grid = ElectronDensityGrid::from_records(&[density(1, 20, 1.0), density(2, 25, 1.0)]);
        assert!(grid.get(25, 1).unwrap().is_nan());
        assert!(grid.get(20, 2).unwrap().is_nan());
        assert_eq!(grid.get(30, 1), None);
        assert_eq!(grid.get(20, 3), None);
    }

    #[test]
    fn test_empty_grid() {
        let grid = ElectronDensityGrid::from_records(&[]);
        assert_eq!(grid.values().dim(), (0, 0));
        assert!(grid.days().is_empty());
    }

    #[test]
    fn test_grid_log10() {
        let grid = ElectronDensityGrid::from_records(&[
            density(1, 20, 1000.0),
            density(1, 25, 0.0),
            density(1, 30, FloatValue::NAN),
        ]);
        let logs = grid.log10();
        assert_relative_eq!(logs[[0, 0]], 3.0);
        assert!(logs[[1, 0]].is_nan());
        assert!(logs[[2, 0]].is_nan());
    }

    // ===== Mean Absorption Tests =====

    #[test]
    fn test_mean_absorption_skips_nan() {
        let results = vec![
            absorption(1, 30.0, 2.0),
            absorption(1, 51.4, 1.0),
            absorption(2, 30.0, FloatValue::NAN),
            absorption(3, 30.0, 4.0),
            absorption(2, 51.4, 3.0),
        ];
        let means = mean_absorption_by_frequency(&results);
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].0, 30.0);
        assert_relative_eq!(means[0].1, 3.0);
        assert_eq!(means[1].0, 51.4);
        assert_relative_eq!(means[1].1, 2.0);
    }

    #[test]
    fn test_mean_absorption_all_nan() {
        let means = mean_absorption_by_frequency(&[absorption(1, 20.5, FloatValue::NAN)]);
        assert_eq!(means.len(), 1);
        assert!(means[0].1.is_nan());
        assert!(mean_absorption_by_frequency(&[]).is_empty());
    }

    #[test]
    fn test_records_serialise_with_lowercase_mode() {
        let json = serde_json::to_value(density(5, 70, 12.5)).unwrap();
        assert_eq!(json["mode"], "day");
        assert_eq!(json["altitude_km"], 70);
    }
}
