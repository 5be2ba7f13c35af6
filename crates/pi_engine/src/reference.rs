//! Naive reference estimator, kept for benchmarking only.
//!
//! [`naive_estimate`] computes the same quantity as
//! [`chunk::estimate`](crate::chunk::estimate) the slow way: it materialises
//! x, y and norm vectors point by point, collects the in-circle norms into a
//! fresh vector and counts them. It has no memory ceiling and is not used by
//! the chunked aggregator.

use pi_core::EstimateError;

use crate::rng::PiRng;

/// Estimates π from `n` points without buffer reuse or chunking.
///
/// Draw order matches the chunk estimator (all x values, then all y
/// values), so for the same generator both return the same estimate.
///
/// # Errors
///
/// Returns `EstimateError::InvalidArgument` if `n` is zero.
///
/// # Examples
///
/// ```rust
/// use pi_engine::reference::naive_estimate;
/// use pi_engine::rng::PiRng;
///
/// let pi = naive_estimate(50_000, &mut PiRng::from_seed(1)).unwrap();
/// assert!((3.0..3.3).contains(&pi));
/// ```
pub fn naive_estimate(n: usize, rng: &mut PiRng) -> Result<f64, EstimateError> {
    if n == 0 {
        return Err(EstimateError::invalid("n", "sample count must be at least 1"));
    }

    let xs: Vec<f64> = (0..n).map(|_| rng.gen_uniform()).collect();
    let ys: Vec<f64> = (0..n).map(|_| rng.gen_uniform()).collect();
    let norms: Vec<f64> = (0..n).map(|i| xs[i] * xs[i] + ys[i] * ys[i]).collect();
    let inside: Vec<f64> = norms.into_iter().filter(|&norm| norm <= 1.0).collect();

    Ok(inside.len() as f64 / n as f64 * 4.0)
}
