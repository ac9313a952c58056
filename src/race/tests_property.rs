//! Property tests for the tail probability
//!
//! Bounds and monotonicity of `compute_prob` across small exact-size
//! binomials and the extreme hash-rate regime.

use super::*;
use proptest::prelude::*;

// Summation noise tolerated when comparing neighbouring thresholds
const SLACK: f64 = 1e-12;

proptest! {
    #[test]
    fn zero_threshold_is_one(n in 0.0f64..1e17, p in 0.0f64..=1.0) {
        prop_assert_eq!(compute_prob(n, p, 0), 1.0);
    }

    #[test]
    fn result_is_a_probability(n in 0.0f64..1e6, p in 0.0f64..=1.0, k in 0u64..64) {
        let prob = compute_prob(n, p, k);
        prop_assert!(prob.is_finite());
        prop_assert!((0.0..=1.0).contains(&prob));
    }

    #[test]
    fn extreme_regime_is_a_probability(
        n in 1e10f64..1e17,
        p in 1e-15f64..1e-12,
        k in 0u64..12
    ) {
        let prob = compute_prob(n, p, k);
        prop_assert!(prob.is_finite());
        prop_assert!((0.0..=1.0).contains(&prob));
    }

    #[test]
    fn non_increasing_in_threshold(
        trials in 1u32..200,
        p in 0.0f64..=1.0,
        k1 in 0u64..200,
        k2 in 0u64..200
    ) {
        let n = trials as f64;
        let (lo, hi) = if k1 <= k2 { (k1, k2) } else { (k2, k1) };
        prop_assume!(hi <= trials as u64);

        prop_assert!(compute_prob(n, p, lo) + SLACK >= compute_prob(n, p, hi));
    }

    #[test]
    fn non_decreasing_in_trials(
        n1 in 0.0f64..1e4,
        extra in 0.0f64..1e4,
        p in 1e-6f64..0.5,
        k in 0u64..8
    ) {
        let n2 = n1 + extra;
        prop_assume!(k as f64 <= n1);

        prop_assert!(compute_prob(n2, p, k) + SLACK >= compute_prob(n1, p, k));
    }

    #[test]
    fn non_decreasing_in_trials_extreme_regime(
        base in 10_000_000_000u64..100_000_000_000_000_000,
        growth in 1e-4f64..1.0,
        p in 1e-15f64..1e-12,
        k in 0u64..12
    ) {
        let n1 = base as f64;
        let n2 = (n1 * (1.0 + growth)).round();

        prop_assert!(compute_prob(n2, p, k) >= compute_prob(n1, p, k));
    }

    #[test]
    fn repeated_rounds_never_exceed_single(single in 0.0f64..=1.0, rounds in 1u32..=u32::MAX) {
        let all_rounds = repeated_rounds(single, rounds);
        prop_assert!((0.0..=single).contains(&all_rounds));
    }
}
