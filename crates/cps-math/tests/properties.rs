//! Property-based tests for cps-math numerical functions.

use proptest::prelude::*;
use cps_math::{clamp_probability, inv_logit, is_distribution, logit, normalize, PROB_CEIL, PROB_FLOOR};

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-9;

// ============================================================================
// logit / inv_logit properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// logit is finite for every input, including the closed boundaries.
    #[test]
    fn logit_always_finite(p in 0.0..=1.0f64) {
        prop_assert!(logit(p).is_finite(), "logit({}) not finite", p);
    }

    /// inv_logit(logit(p)) recovers the clamped probability.
    #[test]
    fn logit_round_trip_recovers_clamped(p in 0.0..=1.0f64) {
        let back = inv_logit(logit(p));
        let expected = clamp_probability(p);
        prop_assert!((back - expected).abs() <= TOL, "p={} back={} expected={}", p, back, expected);
    }

    /// logit is monotone non-decreasing.
    #[test]
    fn logit_monotone(a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(logit(lo) <= logit(hi));
    }

    /// inv_logit stays in [0, 1] for any finite input.
    #[test]
    fn inv_logit_in_unit_interval(z in -1.0e6..1.0e6f64) {
        let p = inv_logit(z);
        prop_assert!((0.0..=1.0).contains(&p), "inv_logit({})={}", z, p);
    }

    /// Clamped probabilities never touch 0 or 1.
    #[test]
    fn clamp_stays_inside(p in -10.0..10.0f64) {
        let c = clamp_probability(p);
        prop_assert!(c >= PROB_FLOOR && c <= PROB_CEIL);
    }
}

// ============================================================================
// simplex properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Normalizing positive weights yields a distribution.
    #[test]
    fn normalize_produces_distribution(values in prop::collection::vec(1e-6..1e3f64, 1..10)) {
        let out = normalize(&values);
        prop_assert!(is_distribution(&out, TOL), "out={:?}", out);
    }

    /// Normalization preserves ratios between entries.
    #[test]
    fn normalize_preserves_ratios(a in 1e-3..1e3f64, b in 1e-3..1e3f64) {
        let out = normalize(&[a, b]);
        prop_assert!(((out[0] / out[1]) - (a / b)).abs() <= 1e-9 * (a / b).max(1.0));
    }
}
