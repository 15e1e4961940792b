//! Numerically safe primitives for log-odds Bayesian updates.

use serde::{Deserialize, Serialize};

/// Lower clamp applied before every logit transform.
pub const PROB_FLOOR: f64 = 0.001;

/// Upper clamp applied before every logit transform.
pub const PROB_CEIL: f64 = 0.999;

/// Closed interval a probability is clamped into before taking log-odds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityBounds {
    pub lower: f64,
    pub upper: f64,
}

impl Default for ProbabilityBounds {
    fn default() -> Self {
        Self {
            lower: PROB_FLOOR,
            upper: PROB_CEIL,
        }
    }
}

impl ProbabilityBounds {
    /// Clamp `p` into the bounds. NaN maps to the lower bound.
    pub fn clamp(&self, p: f64) -> f64 {
        if p.is_nan() {
            return self.lower;
        }
        p.max(self.lower).min(self.upper)
    }
}

/// Clamp a probability into [`PROB_FLOOR`], [`PROB_CEIL`].
pub fn clamp_probability(p: f64) -> f64 {
    ProbabilityBounds::default().clamp(p)
}

/// log(p / (1 - p)) with `p` clamped away from 0 and 1.
///
/// Always finite.
pub fn logit(p: f64) -> f64 {
    let p = clamp_probability(p);
    (p / (1.0 - p)).ln()
}

/// Logistic function 1 / (1 + exp(-z)).
///
/// Evaluated on the side that cannot overflow, so large |z| saturates to
/// 0 or 1 instead of producing NaN.
pub fn inv_logit(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Natural log of a likelihood ratio.
///
/// Non-positive or non-finite ratios carry no usable information and map
/// to 0 (a neutral update).
pub fn log_ratio(lr: f64) -> f64 {
    if lr.is_finite() && lr > 0.0 {
        lr.ln()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn logit_of_half_is_zero() {
        assert!(approx_eq(logit(0.5), 0.0, 1e-15));
    }

    #[test]
    fn logit_clamps_boundaries() {
        let hi = logit(1.0);
        let lo = logit(0.0);
        assert!(hi.is_finite());
        assert!(lo.is_finite());
        assert!(approx_eq(hi, (0.999f64 / 0.001).ln(), 1e-12));
        assert!(approx_eq(lo, -hi, 1e-12));
    }

    #[test]
    fn inv_logit_inverts_logit_inside_bounds() {
        for p in [0.001, 0.05, 0.2, 0.5, 0.8, 0.999] {
            assert!(approx_eq(inv_logit(logit(p)), p, 1e-12), "p={p}");
        }
    }

    #[test]
    fn inv_logit_saturates_without_nan() {
        assert!(approx_eq(inv_logit(1000.0), 1.0, 1e-15));
        assert!(approx_eq(inv_logit(-1000.0), 0.0, 1e-15));
        assert!(inv_logit(f64::NAN).is_nan());
    }

    #[test]
    fn log_ratio_neutral_for_invalid() {
        assert_eq!(log_ratio(0.0), 0.0);
        assert_eq!(log_ratio(-3.0), 0.0);
        assert_eq!(log_ratio(f64::INFINITY), 0.0);
        assert!(approx_eq(log_ratio(20.0), 20.0f64.ln(), 1e-15));
    }

    #[test]
    fn bounds_clamp_nan_to_lower() {
        let b = ProbabilityBounds::default();
        assert_eq!(b.clamp(f64::NAN), PROB_FLOOR);
        assert_eq!(b.clamp(2.0), PROB_CEIL);
        assert_eq!(b.clamp(0.3), 0.3);
    }
}
