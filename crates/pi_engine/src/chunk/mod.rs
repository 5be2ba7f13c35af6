//! Chunk estimator: one bounded batch of samples, one estimate.
//!
//! A chunk draws `n` x-coordinates and `n` y-coordinates uniformly in
//! [0, 1), counts the points with `x² + y² <= 1` (the boundary counts as
//! inside) and returns `4 * inside / n`.
//!
//! Coordinate buffers live in a [`ChunkWorkspace`] so that a worker thread
//! running many chunks allocates once.
//!
//! # Examples
//!
//! ```rust
//! use pi_engine::chunk::estimate;
//! use pi_engine::rng::PiRng;
//!
//! let mut rng = PiRng::from_seed(42);
//! let pi = estimate(100_000, &mut rng).unwrap();
//! assert!((3.0..3.3).contains(&pi));
//! ```

mod workspace;

pub use workspace::ChunkWorkspace;

use pi_core::EstimateError;

use crate::rng::PiRng;

/// Counts how many of the points `(xs[i], ys[i])` lie inside the unit circle.
#[inline]
pub fn count_inside(xs: &[f64], ys: &[f64]) -> usize {
    xs.iter()
        .zip(ys)
        .filter(|&(&x, &y)| x * x + y * y <= 1.0)
        .count()
}

/// Estimates π from `n` points drawn from `rng`.
///
/// Allocates a fresh workspace; see [`estimate_in`] to reuse one.
///
/// # Errors
///
/// - `EstimateError::InvalidArgument` if `n` is zero
/// - `EstimateError::ExecutionFailure` if buffers for `n` points cannot be
///   allocated
pub fn estimate(n: usize, rng: &mut PiRng) -> Result<f64, EstimateError> {
    let mut workspace = ChunkWorkspace::default();
    estimate_in(&mut workspace, n, rng)
}

/// Estimates π from `n` points using the buffers in `workspace`.
///
/// The x buffer is filled before the y buffer, so for a given generator the
/// result is identical to [`estimate`].
///
/// # Errors
///
/// - `EstimateError::InvalidArgument` if `n` is zero
/// - `EstimateError::ExecutionFailure` if the workspace cannot grow to `n`
///   points
pub fn estimate_in(
    workspace: &mut ChunkWorkspace,
    n: usize,
    rng: &mut PiRng,
) -> Result<f64, EstimateError> {
    if n == 0 {
        return Err(EstimateError::invalid("n", "sample count must be at least 1"));
    }

    workspace.ensure_capacity(n)?;
    let (xs, ys) = workspace.coordinates_mut(n);
    rng.fill_uniform(xs);
    rng.fill_uniform(ys);

    let inside = count_inside(xs, ys);
    Ok(inside as f64 / n as f64 * 4.0)
}

/// Estimates π from `n` points with a generator seeded from OS entropy.
///
/// # Errors
///
/// Returns `EstimateError::InvalidArgument` if `n` is zero.
pub fn estimate_with_entropy(n: usize) -> Result<f64, EstimateError> {
    estimate(n, &mut PiRng::from_entropy())
}
