//! Scalar Newton-Raphson iteration for the iterative kernels.

use crate::error::{CorrelationError, CorrelationResult};

/// Newton solver configuration.
#[derive(Debug, Clone, Copy)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Stop once successive iterates differ by no more than this
    pub step_tol: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            step_tol: 1e-10,
        }
    }
}

/// Newton iteration result.
#[derive(Debug, Clone, Copy)]
pub struct NewtonResult {
    /// Root estimate
    pub x: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Solve `f(x) = 0` from `x0`, where `eval` returns `(f(x), f'(x))`.
///
/// Fails with `ConvergenceFailure` when the derivative vanishes, an iterate
/// becomes non-finite, or `max_iterations` is reached.
pub fn newton_solve<F>(
    what: &str,
    x0: f64,
    eval: F,
    config: &NewtonConfig,
) -> CorrelationResult<NewtonResult>
where
    F: Fn(f64) -> (f64, f64),
{
    let mut x = x0;

    for iter in 1..=config.max_iterations {
        let (f, df) = eval(x);
        if df == 0.0 || !df.is_finite() || !f.is_finite() {
            return Err(CorrelationError::ConvergenceFailure {
                what: format!("{what} (degenerate derivative at x = {x})"),
                iterations: iter,
            });
        }

        let next = x - f / df;
        if !next.is_finite() {
            return Err(CorrelationError::ConvergenceFailure {
                what: format!("{what} (non-finite iterate)"),
                iterations: iter,
            });
        }

        if (next - x).abs() <= config.step_tol {
            return Ok(NewtonResult {
                x: next,
                iterations: iter,
            });
        }
        x = next;
    }

    Err(CorrelationError::ConvergenceFailure {
        what: what.to_string(),
        iterations: config.max_iterations,
    })
}
