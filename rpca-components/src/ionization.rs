//! Ionization aggregation
//!
//! Reduces the per-channel ionization profile to a total ionization rate per altitude.

use rpca_core::channels::N_CHANNELS;
use rpca_core::profile::{IonizationProfile, TotalIonization};
use rpca_core::types::FloatValue;

/// Sum the channel contributions at every altitude
pub fn total_ionization(profile: &IonizationProfile) -> TotalIonization {
    profile.map(|_, rates| rates.iter().sum::<FloatValue>())
}

/// Contribution of each channel summed over all altitudes
///
/// Useful to see which part of the spectrum drives the ionization.
pub fn channel_totals(profile: &IonizationProfile) -> [FloatValue; N_CHANNELS] {
    let mut totals = [0.0; N_CHANNELS];
    for (_, rates) in profile.iter() {
        for (total, q) in totals.iter_mut().zip(rates) {
            *total += q;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_channels_per_altitude() {
        let mut profile = IonizationProfile::default();
        profile.get_mut(80).unwrap()[0] = 1.5;
        profile.get_mut(80).unwrap()[3] = 2.5;
        profile.get_mut(40).unwrap()[9] = 7.0;

        let total = total_ionization(&profile);
        assert_eq!(total.value_or_default(80), 4.0);
        assert_eq!(total.value_or_default(40), 7.0);
        assert_eq!(total.value_or_default(115), 0.0);
    }

    #[test]
    fn test_empty_profile_sums_to_zero() {
        let total = total_ionization(&IonizationProfile::default());
        assert!(total.iter().all(|(_, q)| *q == 0.0));
    }

    #[test]
    fn test_channel_totals() {
        let mut profile = IonizationProfile::default();
        profile.get_mut(100).unwrap()[1] = 1.0;
        profile.get_mut(95).unwrap()[1] = 2.0;

        let totals = channel_totals(&profile);
        assert_eq!(totals.len(), N_CHANNELS);
        assert_eq!(totals[1], 3.0);
        assert_eq!(totals[0], 0.0);
    }
}
