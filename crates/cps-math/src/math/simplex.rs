//! Helpers for keeping a probability vector on the simplex.

/// Default tolerance for simplex checks.
pub const SIMPLEX_TOL: f64 = 1e-9;

/// Rescale `values` in place so they sum to 1.
///
/// Returns false (and leaves the slice untouched) when the sum is zero,
/// negative or not finite.
pub fn normalize_in_place(values: &mut [f64]) -> bool {
    let sum: f64 = values.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return false;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
    true
}

/// Return a normalized copy of `values`, or a uniform vector if the input
/// cannot be normalized.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    if !normalize_in_place(&mut out) && !out.is_empty() {
        let uniform = 1.0 / out.len() as f64;
        out.iter_mut().for_each(|v| *v = uniform);
    }
    out
}

/// True when every entry is in [0, 1] and the sum is 1 within `tol`.
pub fn is_distribution(values: &[f64], tol: f64) -> bool {
    if values.is_empty() {
        return false;
    }
    if values.iter().any(|v| !v.is_finite() || *v < -tol || *v > 1.0 + tol) {
        return false;
    }
    let sum: f64 = values.iter().sum();
    (sum - 1.0).abs() <= tol
}
