//! Property-based tests for the rate model, noise channels and analyzer.

use proptest::prelude::*;
use radqec_core::{
    BaseRateTable, OrbitProfile, OutcomeDistribution, SATURATION_RATE, analyze,
    build_noise_channels,
};
use radqec_ir::{PauliChannel, QuantumError, QubitId};

/// One entry of the standard table.
fn arb_orbit_entry() -> impl Strategy<Value = (u32, &'static str, f64)> {
    prop::sample::select(vec![
        (600, "SSO", 0.010),
        (600, "45", 0.008),
        (700, "SSO", 0.015),
        (700, "45", 0.010),
        (800, "SSO", 0.020),
        (800, "45", 0.012),
    ])
}

/// Outcome histograms over the 16 possible 4-bit strings.
fn arb_outcomes() -> impl Strategy<Value = Vec<(String, u64)>> {
    prop::collection::vec((0u8..16, 0u64..10_000), 0..20).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(bits, count)| (format!("{bits:04b}"), count))
            .collect()
    })
}

proptest! {
    #[test]
    fn overall_rate_is_capped_product((altitude, inclination, base) in arb_orbit_entry(),
                                      years in 0.001f64..200.0) {
        let table = BaseRateTable::standard();
        let rates = table
            .error_rates(&OrbitProfile::new(altitude, inclination, years))
            .unwrap();

        prop_assert_eq!(rates.overall_rate, (base * years).min(SATURATION_RATE));
        prop_assert!(rates.overall_rate <= SATURATION_RATE);
        prop_assert!((rates.bit_flip_rate + rates.phase_flip_rate - rates.overall_rate).abs() < 1e-12);
    }

    #[test]
    fn single_qubit_channel_is_a_distribution(p in 0.0f64..=(1.0 / 3.0)) {
        let noise = build_noise_channels(p, 6).unwrap();
        let Some(QuantumError::Pauli(channel)) = noise.lookup("h", &[QubitId(0)]) else {
            panic!("missing h rule");
        };
        let probs = channel.probabilities();
        prop_assert!(probs.iter().all(|&x| x >= 0.0));
        prop_assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn probabilities_above_a_third_are_rejected(p in 0.3334f64..10.0) {
        prop_assert!(build_noise_channels(p, 6).is_err());
    }

    #[test]
    fn symmetric_channel_matches_builder(p in 0.0f64..=(1.0 / 3.0)) {
        let direct = QuantumError::Pauli(PauliChannel::symmetric(p).unwrap());
        let noise = build_noise_channels(p, 2).unwrap();
        prop_assert_eq!(noise.lookup("reset", &[QubitId(1)]), Some(&direct));
    }

    #[test]
    fn analyzer_buckets_partition_valid_shots(pairs in arb_outcomes()) {
        let outcomes = OutcomeDistribution::from_pairs(pairs).unwrap();
        let summary = analyze(&outcomes);

        let bucket_sum: u64 = summary.syndrome_distribution().map(|(_, n)| n).sum();
        prop_assert_eq!(bucket_sum, summary.valid_shots);
        prop_assert!(summary.valid_shots <= summary.total_shots);
        prop_assert_eq!(summary.total_shots, outcomes.total_shots());
        prop_assert!((0.0..=1.0).contains(&summary.post_selection_ratio));
    }

    #[test]
    fn analyzer_is_idempotent(pairs in arb_outcomes()) {
        let outcomes = OutcomeDistribution::from_pairs(pairs).unwrap();
        prop_assert_eq!(analyze(&outcomes), analyze(&outcomes));
    }
}
