//! Chunked aggregator: bounded chunks, parallel dispatch, one estimate.
//!
//! A request of `n` samples is partitioned by [`ChunkPlan`]. Requests that
//! fit in one chunk run directly on the caller's thread. Larger requests
//! are dispatched to a rayon pool that lives for exactly one call; every
//! chunk owns its generator (`PiRng::for_chunk(seed, index)`) and each
//! worker reuses one [`ChunkWorkspace`]. The call blocks until every chunk
//! has finished and then averages the chunk estimates.
//!
//! # Architecture
//!
//! ```text
//! ChunkedEstimator::run(n)
//! ├── ChunkPlan::new(n, limit, policy)   (partition)
//! ├── direct path: run_chunk(n)          (n <= limit)
//! └── pool path
//!     ├── ThreadPoolBuilder (per call)
//!     ├── map_init(ChunkWorkspace, run_chunk)
//!     ├── join (all chunks, in index order)
//!     └── combine (mean or sample-weighted mean)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pi_engine::aggregator::ChunkedEstimator;
//! use pi_engine::config::EstimatorConfig;
//!
//! let config = EstimatorConfig::builder()
//!     .chunk_limit(100_000)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let report = ChunkedEstimator::new(config).run(400_000).unwrap();
//! assert_eq!(report.chunk_count, 4);
//! assert!((3.0..3.3).contains(&report.estimate));
//! ```

mod report;

pub use report::EstimateReport;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use pi_core::{ChunkPlan, EstimateError};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::chunk::{self, ChunkWorkspace};
use crate::config::EstimatorConfig;
use crate::rng::PiRng;

/// Chunked π estimator driven by an [`EstimatorConfig`].
#[derive(Clone, Debug, Default)]
pub struct ChunkedEstimator {
    config: EstimatorConfig,
}

impl ChunkedEstimator {
    /// Creates an estimator from a validated configuration.
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimates π from `n` samples and returns only the value.
    ///
    /// # Errors
    ///
    /// See [`ChunkedEstimator::run`].
    pub fn estimate(&self, n: usize) -> Result<f64, EstimateError> {
        self.run(n).map(|report| report.estimate)
    }

    /// Estimates π from `n` samples.
    ///
    /// # Errors
    ///
    /// - `EstimateError::InvalidArgument` if `n` is zero
    /// - `EstimateError::ExecutionFailure` if the worker pool cannot be
    ///   built or a chunk task panics
    pub fn run(&self, n: usize) -> Result<EstimateReport, EstimateError> {
        self.run_with(n, chunk::estimate_in)
    }

    /// Runs a request with a custom chunk kernel.
    fn run_with<F>(&self, n: usize, kernel: F) -> Result<EstimateReport, EstimateError>
    where
        F: Fn(&mut ChunkWorkspace, usize, &mut PiRng) -> Result<f64, EstimateError> + Sync,
    {
        let plan = ChunkPlan::new(n, self.config.chunk_limit(), self.config.remainder())?;
        let seed = self.config.seed().unwrap_or_else(rand::random);

        debug!(
            samples = n,
            limit = plan.limit().get(),
            chunks = plan.chunk_count(),
            dropped = plan.samples_dropped(),
            seed,
            "planned estimation"
        );

        if plan.is_direct() {
            let mut workspace = ChunkWorkspace::default();
            let mut rng = PiRng::from_seed(seed);
            let value = run_chunk(0, &kernel, &mut workspace, n, &mut rng)?;
            return Ok(EstimateReport::new(&plan, seed, 1, vec![value], value));
        }

        let threads = self.config.effective_threads(plan.chunk_count());
        let chunk_estimates = dispatch(&plan, seed, threads, &kernel)?;
        let value = combine(&plan, &chunk_estimates);

        debug!(estimate = value, threads, "chunks joined");
        Ok(EstimateReport::new(&plan, seed, threads, chunk_estimates, value))
    }
}

/// Estimates π from `n` samples in chunks of at most `limit` points.
///
/// Unseeded; the pool is sized to the host CPU count.
///
/// # Errors
///
/// - `EstimateError::InvalidArgument` if `n` or `limit` is zero
/// - `EstimateError::ExecutionFailure` if a chunk cannot run
///
/// # Examples
///
/// ```rust
/// use pi_engine::estimate_chunked;
///
/// let pi = estimate_chunked(200_000, 50_000).unwrap();
/// assert!((3.0..3.3).contains(&pi));
/// assert!(estimate_chunked(0, 50_000).is_err());
/// ```
pub fn estimate_chunked(n: usize, limit: usize) -> Result<f64, EstimateError> {
    let config = EstimatorConfig::builder().chunk_limit(limit).build()?;
    ChunkedEstimator::new(config).estimate(n)
}

/// Runs every chunk of `plan` on a dedicated pool and returns the chunk
/// estimates in index order.
fn dispatch<F>(
    plan: &ChunkPlan,
    seed: u64,
    threads: usize,
    kernel: &F,
) -> Result<Vec<f64>, EstimateError>
where
    F: Fn(&mut ChunkWorkspace, usize, &mut PiRng) -> Result<f64, EstimateError> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|index| format!("pi-chunk-{}", index))
        .build()
        .map_err(|e| EstimateError::ExecutionFailure(format!("failed to build worker pool: {}", e)))?;

    let results: Vec<Result<f64, EstimateError>> = pool.install(|| {
        (0..plan.chunk_count())
            .into_par_iter()
            .map_init(ChunkWorkspace::default, |workspace, index| {
                let size = plan.chunk_size(index);
                let mut rng = PiRng::for_chunk(seed, index);
                trace!(index, size, "chunk started");
                run_chunk(index, kernel, workspace, size, &mut rng)
            })
            .collect()
    });

    results.into_iter().collect()
}

/// Runs one chunk, turning a panic in the kernel into `ExecutionFailure`.
fn run_chunk<F>(
    index: usize,
    kernel: &F,
    workspace: &mut ChunkWorkspace,
    size: usize,
    rng: &mut PiRng,
) -> Result<f64, EstimateError>
where
    F: Fn(&mut ChunkWorkspace, usize, &mut PiRng) -> Result<f64, EstimateError>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(|| kernel(workspace, size, rng)))
        .unwrap_or_else(|payload| {
            Err(EstimateError::ExecutionFailure(format!(
                "chunk {} panicked: {}",
                index,
                panic_message(payload.as_ref())
            )))
        });

    trace!(
        index,
        buffer_bytes = workspace.memory_bytes(),
        ok = result.is_ok(),
        "chunk finished"
    );
    result
}

/// Combines chunk estimates into the final estimate.
///
/// Equal-size chunks give the arithmetic mean. A plan with a partial tail
/// chunk weights each estimate by its sample count.
pub fn combine(plan: &ChunkPlan, chunk_estimates: &[f64]) -> f64 {
    if chunk_estimates.is_empty() {
        return 0.0;
    }

    if plan.is_uniform() {
        return chunk_estimates.iter().sum::<f64>() / chunk_estimates.len() as f64;
    }

    let weighted: f64 = chunk_estimates
        .iter()
        .zip(plan.chunk_sizes())
        .map(|(estimate, size)| estimate * size as f64)
        .sum();
    weighted / plan.samples_drawn() as f64
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pi_core::{ChunkLimit, RemainderPolicy};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn seeded(limit: usize, seed: u64) -> ChunkedEstimator {
        let config = EstimatorConfig::builder()
            .chunk_limit(limit)
            .num_threads(4)
            .seed(seed)
            .build()
            .unwrap();
        ChunkedEstimator::new(config)
    }

    #[test]
    fn test_zero_samples_is_invalid() {
        let err = seeded(100, 1).run(0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(estimate_chunked(0, 100).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_zero_limit_is_invalid() {
        let err = estimate_chunked(1_000, 0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_direct_path_matches_chunk_estimator() {
        let report = seeded(10_000, 42).run(10_000).unwrap();
        let direct = chunk::estimate(10_000, &mut PiRng::from_seed(42)).unwrap();

        assert_eq!(report.estimate, direct);
        assert_eq!(report.chunk_count, 1);
        assert_eq!(report.threads, 1);
        assert!(report.is_direct());
    }

    #[test]
    fn test_pool_path_is_mean_of_chunk_streams() {
        let report = seeded(2_000, 9).run(10_000).unwrap();

        let expected = (0..5)
            .map(|index| chunk::estimate(2_000, &mut PiRng::for_chunk(9, index)).unwrap())
            .sum::<f64>()
            / 5.0;

        assert_eq!(report.chunk_count, 5);
        assert_eq!(report.chunk_estimates.len(), 5);
        assert_eq!(report.estimate, expected);
    }

    #[test]
    fn test_seeded_runs_are_reproducible_across_pool_sizes() {
        let config = |threads| {
            EstimatorConfig::builder()
                .chunk_limit(1_000)
                .num_threads(threads)
                .seed(77)
                .build()
                .unwrap()
        };

        let one = ChunkedEstimator::new(config(1)).run(8_000).unwrap();
        let many = ChunkedEstimator::new(config(8)).run(8_000).unwrap();

        assert_eq!(one.chunk_estimates, many.chunk_estimates);
        assert_eq!(one.estimate, many.estimate);
    }

    #[test]
    fn test_truncation_dispatches_full_chunks_only() {
        let calls = AtomicUsize::new(0);
        let sizes = std::sync::Mutex::new(Vec::new());

        let report = seeded(1_000, 3)
            .run_with(1_500, |_, size, _| {
                calls.fetch_add(1, Ordering::SeqCst);
                sizes.lock().unwrap().push(size);
                Ok(3.0)
            })
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*sizes.lock().unwrap(), vec![1_000]);
        assert_eq!(report.samples_drawn, 1_000);
        assert_eq!(report.samples_dropped(), 500);
        assert!(!report.is_direct());
    }

    #[test]
    fn test_partial_chunk_dispatches_remainder() {
        let config = EstimatorConfig::builder()
            .chunk_limit(1_000)
            .seed(3)
            .remainder(RemainderPolicy::PartialChunk)
            .build()
            .unwrap();

        let report = ChunkedEstimator::new(config)
            .run_with(1_500, |_, size, _| Ok(if size == 1_000 { 3.0 } else { 3.3 }))
            .unwrap();

        assert_eq!(report.chunk_count, 2);
        assert_eq!(report.samples_drawn, 1_500);
        assert_relative_eq!(report.estimate, (3.0 * 1_000.0 + 3.3 * 500.0) / 1_500.0);
    }

    #[test]
    fn test_panicking_chunk_is_execution_failure() {
        let result = seeded(100, 5).run_with(1_000, |_, _, rng| {
            if rng.seed() == crate::rng::split_seed(5, 7) {
                panic!("simulated worker crash");
            }
            Ok(3.0)
        });

        match result {
            Err(EstimateError::ExecutionFailure(message)) => {
                assert!(message.contains("chunk 7"));
                assert!(message.contains("simulated worker crash"));
            }
            other => panic!("expected ExecutionFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_panicking_direct_chunk_is_execution_failure() {
        let result = seeded(100, 5).run_with(50, |_, _, _| panic!("simulated worker crash"));

        match result {
            Err(EstimateError::ExecutionFailure(message)) => {
                assert!(message.contains("chunk 0"));
                assert!(message.contains("simulated worker crash"));
            }
            other => panic!("expected ExecutionFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_unallocatable_direct_chunk_is_execution_failure() {
        let config = EstimatorConfig::builder()
            .chunk_limit(usize::MAX)
            .seed(1)
            .build()
            .unwrap();
        let err = ChunkedEstimator::new(config).run(usize::MAX / 4).unwrap_err();
        assert!(err.is_execution_failure());
    }

    #[test]
    fn test_chunk_error_propagates() {
        let result = seeded(100, 5).run_with(300, |_, _, _| {
            Err(EstimateError::ExecutionFailure("out of memory".to_string()))
        });
        assert_eq!(
            result.unwrap_err(),
            EstimateError::ExecutionFailure("out of memory".to_string())
        );
    }

    #[test]
    fn test_combine_uniform_is_mean() {
        let limit = ChunkLimit::new(10).unwrap();
        let plan = ChunkPlan::new(30, limit, RemainderPolicy::Truncate).unwrap();
        assert_relative_eq!(combine(&plan, &[3.0, 3.2, 3.4]), 3.2);
    }

    #[test]
    fn test_combine_weights_partial_tail() {
        let limit = ChunkLimit::new(10).unwrap();
        let plan = ChunkPlan::new(25, limit, RemainderPolicy::PartialChunk).unwrap();
        assert_relative_eq!(combine(&plan, &[4.0, 4.0, 0.0]), 80.0 / 25.0);
    }

    #[test]
    fn test_unseeded_report_records_seed() {
        let config = EstimatorConfig::builder().chunk_limit(500).build().unwrap();
        let report = ChunkedEstimator::new(config).run(2_000).unwrap();

        let replay_config = EstimatorConfig::builder()
            .chunk_limit(500)
            .seed(report.seed)
            .build()
            .unwrap();
        let replay = ChunkedEstimator::new(replay_config).run(2_000).unwrap();

        assert_eq!(report.estimate, replay.estimate);
    }
}
