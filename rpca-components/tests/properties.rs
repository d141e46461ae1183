//! Physical property tests for the absorption model components.
//!
//! These tests verify invariants that must hold for any input:
//! - Proton energy only ever decreases on the way down
//! - Ionization scales linearly with flux
//! - Recombination regimes partition every (altitude, SZA) pair
//! - Hand-computed reference values for a single slab

use approx::{assert_abs_diff_eq, assert_relative_eq};
use rpca_components::absorption::{magnetoionic_integral, AbsorptionModel};
use rpca_components::deposition::EnergyDepositionModel;
use rpca_components::geometry::GeometryModel;
use rpca_components::ionization::total_ionization;
use rpca_components::recombination::{RecombinationModel, RecombinationRegime};
use rpca_core::atmosphere::{AltitudeSlab, AtmosphereTable};
use rpca_core::channels::{ENERGY_CHANNELS, N_CHANNELS};
use rpca_core::observation::FluxObservation;
use rpca_core::profile::ElectronDensityProfile;

mod energy_deposition {
    use super::*;

    /// Residual energy is non-increasing, never negative, and once a proton
    /// stops no deeper slab receives anything from it.
    #[test]
    fn test_energy_monotonicity_all_channels() {
        let model = EnergyDepositionModel::new();
        let table = AtmosphereTable::standard();

        for channel in ENERGY_CHANNELS.iter() {
            let path = model.degrade(channel.midpoint_mev(), table.slabs());
            let mut previous = channel.midpoint_mev();
            for deposit in &path.deposits {
                assert!(deposit.energy_lost_mev >= 0.0);
                assert!(deposit.residual_energy_mev >= 0.0);
                assert!(
                    deposit.residual_energy_mev <= previous,
                    "Energy increased at {} km for channel {}",
                    deposit.altitude_km,
                    channel.flux_field
                );
                previous = deposit.residual_energy_mev;
            }

            if let Some(stop) = path.stopping_altitude() {
                let mut fluxes = [0.0; N_CHANNELS];
                fluxes[channel.index] = 1e3;
                let profile = model.deposit(&FluxObservation::new(1, 1990, fluxes), &table);
                for (altitude, rates) in profile.iter() {
                    if altitude < stop {
                        assert_eq!(rates[channel.index], 0.0);
                    }
                }
            }
        }
    }

    /// Doubling the flux doubles the ionization rate at every altitude.
    #[test]
    fn test_flux_linearity() {
        let model = EnergyDepositionModel::new();
        let table = AtmosphereTable::standard();

        let single = model.deposit(&FluxObservation::new(50, 1990, [10.0; N_CHANNELS]), &table);
        let double = model.deposit(&FluxObservation::new(50, 1990, [20.0; N_CHANNELS]), &table);

        for ((_, a), (_, b)) in single.iter().zip(double.iter()) {
            for (qa, qb) in a.iter().zip(b.iter()) {
                assert_relative_eq!(*qb, 2.0 * qa, max_relative = 1e-12);
            }
        }
    }

    /// 1 MeV proton through the 100 km slab, flux 100.
    ///
    /// log10(1) = 0 so the correction is 1 + a0 = 0.9684:
    /// loss = 287 * 0.9684 * 0.119 / 1000 MeV, q = 0.12 * loss * 100.
    #[test]
    fn test_single_slab_reference_values() {
        let model = EnergyDepositionModel::new();
        let table = AtmosphereTable::standard();
        let slab = *table.slab(100).unwrap();
        assert_eq!(
            slab,
            AltitudeSlab {
                altitude_km: 100,
                thickness_cm: 0.119
            }
        );

        let path = model.degrade(1.0, &[slab]);
        assert_eq!(path.deposits.len(), 1);
        let lost = path.deposits[0].energy_lost_mev;
        assert_relative_eq!(lost, 287.0 * 0.9684 * 0.119 / 1000.0, max_relative = 1e-12);
        assert_relative_eq!(lost, 0.0330737652, max_relative = 1e-9);

        let q = model.ionization_rate(lost, 100.0);
        assert_relative_eq!(q, 0.3968851824, max_relative = 1e-9);

        // The same slab's neutral state feeds the absorption stage
        let neutral = table.neutral(100).unwrap();
        assert_eq!(neutral.density_cm3, 4.768e12);
        assert_eq!(neutral.temperature_k, 228.0);
    }

    #[test]
    fn test_total_ionization_is_non_negative() {
        let model = EnergyDepositionModel::new();
        let table = AtmosphereTable::standard();
        let obs = FluxObservation::from_named_fluxes(
            143,
            1992,
            [
                ("p1_fx", 1.46e4),
                ("p2_fx", 4.04e3),
                ("p3_fx", 5.98e2),
                ("p4_fx", 3.35e1),
                ("p5_fx", 2.65e-1),
                ("p6_fx", 2.62e-3),
                ("p8_fx", 3.98e-3),
                ("p9_fx", 1.69e-3),
                ("p10_fx", 1.04e-3),
                ("p11_fx", 8.82e-4),
            ],
        );
        let total = total_ionization(&model.deposit(&obs, &table));
        assert!(total.iter().all(|(_, q)| *q >= 0.0 && q.is_finite()));
        assert!(total.iter().any(|(_, q)| *q > 0.0));
    }
}

mod recombination_regimes {
    use super::*;

    /// Exactly one regime applies to every (altitude, SZA) pair, and altitudes
    /// above 85 km always use the high-altitude regime.
    #[test]
    fn test_regime_partition() {
        let geometry = GeometryModel::new();
        let model = RecombinationModel::new();

        let mut sza = 0.0;
        while sza <= 180.0 {
            let shadow = geometry.earth_shadow_height(sza);
            for altitude in (20..=115).step_by(5) {
                let regime = model.select_regime(altitude as f64, shadow);
                if altitude > 85 {
                    assert_eq!(regime, RecombinationRegime::HighAltitude);
                } else {
                    assert!(matches!(
                        regime,
                        RecombinationRegime::Day | RecombinationRegime::Night
                    ));
                    let expect_night = (altitude as f64) < shadow;
                    assert_eq!(regime == RecombinationRegime::Night, expect_night);
                }
            }
            sza += 2.5;
        }
    }
}

mod absorption {
    use super::*;

    #[test]
    fn test_zero_density_zero_absorption_all_frequencies() {
        let model = AbsorptionModel::new();
        let table = AtmosphereTable::standard();
        let density = ElectronDensityProfile::filled(0.0);
        for frequency in [20.5, 30.0, 38.2, 51.4] {
            assert_eq!(model.total_absorption(&table, &density, frequency).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_rational_approximation_at_one() {
        let numerator = 1.0 + 6.6945939 + 16.901002 + 1.1630641;
        let denominator = 1.0 + 6.6314497 + 35.355257 + 68.920505 + 64.093464 + 4.3605732;
        assert_abs_diff_eq!(
            magnetoionic_integral(1.0),
            numerator / denominator,
            epsilon = 1e-15
        );
    }
}

mod geometry {
    use super::*;

    /// In southern summer the sun stays above the horizon at the pole all day,
    /// at the highest elevation it reaches there.
    #[test]
    fn test_south_pole_solstice() {
        let geometry = GeometryModel::new();
        assert_abs_diff_eq!(geometry.solar_declination(355), -23.44, epsilon = 1e-3);
        let sza = geometry.solar_zenith_angle(355, 1990).unwrap();
        assert_abs_diff_eq!(sza, 66.56, epsilon = 1e-3);

        let lowest = (1..=365)
            .map(|day| geometry.solar_zenith_angle(day, 1990).unwrap())
            .fold(f64::INFINITY, f64::min);
        assert_abs_diff_eq!(lowest, sza, epsilon = 1e-2);
    }
}
