//! Chunked estimator configuration.
//!
//! This module provides [`EstimatorConfig`] and its builder. A config fixes
//! everything about a run except the sample count: chunk limit, worker
//! pool size, seed and remainder policy.

use pi_core::{ChunkLimit, EstimateError, MemoryBudget, RemainderPolicy};

/// Configuration for [`ChunkedEstimator`](crate::aggregator::ChunkedEstimator).
///
/// Use [`EstimatorConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pi_engine::config::EstimatorConfig;
/// use pi_engine::RemainderPolicy;
///
/// let config = EstimatorConfig::builder()
///     .chunk_limit(250_000)
///     .num_threads(4)
///     .seed(42)
///     .remainder(RemainderPolicy::PartialChunk)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.chunk_limit().get(), 250_000);
/// assert_eq!(config.num_threads(), Some(4));
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Maximum points per chunk.
    chunk_limit: ChunkLimit,
    /// Worker pool size; `None` means one worker per CPU.
    num_threads: Option<usize>,
    /// Optional base seed for reproducibility.
    seed: Option<u64>,
    /// Handling of samples beyond the last full chunk.
    remainder: RemainderPolicy,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            chunk_limit: ChunkLimit::default(),
            num_threads: None,
            seed: None,
            remainder: RemainderPolicy::default(),
        }
    }
}

impl EstimatorConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EstimatorConfigBuilder {
        EstimatorConfigBuilder::default()
    }

    /// Returns the chunk limit.
    #[inline]
    pub fn chunk_limit(&self) -> ChunkLimit {
        self.chunk_limit
    }

    /// Returns the configured pool size, if any.
    #[inline]
    pub fn num_threads(&self) -> Option<usize> {
        self.num_threads
    }

    /// Returns the optional base seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the remainder policy.
    #[inline]
    pub fn remainder(&self) -> RemainderPolicy {
        self.remainder
    }

    /// Pool size for a run of `chunk_count` chunks.
    ///
    /// The configured size (or the host CPU count) capped at the number of
    /// chunks, and never below one.
    pub fn effective_threads(&self, chunk_count: usize) -> usize {
        let requested = self.num_threads.unwrap_or_else(num_cpus::get);
        requested.min(chunk_count).max(1)
    }

    /// Peak coordinate-buffer memory of a run, in bytes.
    pub fn peak_buffer_bytes(&self, chunk_count: usize) -> usize {
        self.effective_threads(chunk_count)
            .saturating_mul(self.chunk_limit.chunk_bytes())
    }
}

/// Builder for [`EstimatorConfig`].
///
/// `chunk_limit` and `memory_budget` both set the limit; the last call wins.
#[derive(Clone, Debug, Default)]
pub struct EstimatorConfigBuilder {
    chunk_limit: Option<usize>,
    memory_budget: Option<MemoryBudget>,
    num_threads: Option<usize>,
    seed: Option<u64>,
    remainder: RemainderPolicy,
}

impl EstimatorConfigBuilder {
    /// Sets the maximum number of points per chunk.
    #[inline]
    pub fn chunk_limit(mut self, limit: usize) -> Self {
        self.chunk_limit = Some(limit);
        self.memory_budget = None;
        self
    }

    /// Derives the chunk limit from a per-chunk memory budget.
    #[inline]
    pub fn memory_budget(mut self, budget: MemoryBudget) -> Self {
        self.memory_budget = Some(budget);
        self.chunk_limit = None;
        self
    }

    /// Sets the worker pool size.
    #[inline]
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Sets the base seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the remainder policy.
    #[inline]
    pub fn remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `EstimateError::InvalidArgument` if:
    /// - the chunk limit is 0
    /// - the memory budget cannot hold one point
    /// - the thread count is 0
    pub fn build(self) -> Result<EstimatorConfig, EstimateError> {
        let chunk_limit = match (self.chunk_limit, self.memory_budget) {
            (Some(limit), _) => ChunkLimit::new(limit)?,
            (None, Some(budget)) => ChunkLimit::from_budget(budget)?,
            (None, None) => ChunkLimit::default(),
        };

        if self.num_threads == Some(0) {
            return Err(EstimateError::invalid(
                "num_threads",
                "worker pool needs at least one thread",
            ));
        }

        Ok(EstimatorConfig {
            chunk_limit,
            num_threads: self.num_threads,
            seed: self.seed,
            remainder: self.remainder,
        })
    }
}
