//! Result of one chunked estimation run.

use std::f64::consts::PI;

use pi_core::ChunkPlan;

/// Final estimate plus the facts of how it was produced.
///
/// Carries no statistical error bounds; `deviation` is the plain distance
/// from the true value of π.
#[derive(Clone, Debug, PartialEq)]
pub struct EstimateReport {
    /// Aggregate π estimate.
    pub estimate: f64,
    /// Base seed of the run (drawn from entropy when none was configured).
    pub seed: u64,
    /// Samples the caller asked for.
    pub samples_requested: usize,
    /// Samples actually generated.
    pub samples_drawn: usize,
    /// Number of chunks run.
    pub chunk_count: usize,
    /// Worker threads used (1 on the direct path).
    pub threads: usize,
    /// Per-chunk estimates in chunk-index order.
    pub chunk_estimates: Vec<f64>,
    /// Whether the request ran as a single chunk on the caller's thread.
    pub direct: bool,
}

impl EstimateReport {
    pub(crate) fn new(
        plan: &ChunkPlan,
        seed: u64,
        threads: usize,
        chunk_estimates: Vec<f64>,
        estimate: f64,
    ) -> Self {
        Self {
            estimate,
            seed,
            samples_requested: plan.samples_requested(),
            samples_drawn: plan.samples_drawn(),
            chunk_count: plan.chunk_count(),
            threads,
            chunk_estimates,
            direct: plan.is_direct(),
        }
    }

    /// Requested samples that were never generated.
    #[inline]
    pub fn samples_dropped(&self) -> usize {
        self.samples_requested - self.samples_drawn
    }

    /// `true` when the request ran as a single chunk without a pool.
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.direct
    }

    /// Absolute distance between the estimate and π.
    #[inline]
    pub fn deviation(&self) -> f64 {
        (self.estimate - PI).abs()
    }
}
