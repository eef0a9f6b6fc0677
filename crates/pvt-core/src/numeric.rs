//! Float helpers shared by unit conversion and range checking.

use crate::{CoreError, CoreResult};

/// Absolute + relative closeness thresholds.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Purely relative tolerance.
    pub fn relative(rel: f64) -> Self {
        Self { abs: 0.0, rel }
    }
}

/// `a` and `b` agree within either threshold of `tol`.
pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: f64, what: &'static str) -> CoreResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Inclusive interval test; a missing bound is unconstrained.
pub fn within_bounds(v: f64, lower: Option<f64>, upper: Option<f64>) -> bool {
    lower.is_none_or(|lo| v >= lo) && upper.is_none_or(|hi| v <= hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closeness_uses_either_threshold() {
        let tol = Tolerances::default();
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(nearly_equal(2000.0, 2000.0 + 1e-7, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
        assert!(!nearly_equal(0.0, 1e-13, Tolerances::relative(1e-9)));
        assert!(nearly_equal(1983.2, 1983.3, Tolerances::relative(1e-4)));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let err = ensure_finite(f64::NAN, "pb").unwrap_err();
        assert!(err.to_string().contains("Non-finite"));
        assert!(ensure_finite(f64::INFINITY, "pb").is_err());
        assert_eq!(ensure_finite(3.5, "pb").unwrap(), 3.5);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(within_bounds(0.59, Some(0.59), Some(0.95)));
        assert!(within_bounds(0.95, Some(0.59), Some(0.95)));
        assert!(!within_bounds(0.96, Some(0.59), Some(0.95)));
        assert!(within_bounds(-1e9, None, Some(0.0)));
        assert!(within_bounds(1e9, None, None));
    }
}
