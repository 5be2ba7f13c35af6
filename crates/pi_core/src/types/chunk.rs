//! Chunk sizing and partitioning.
//!
//! A sample count larger than the chunk limit is split into bounded chunks.
//! The partition itself is a pure value ([`ChunkPlan`]) so the aggregator,
//! the CLI and the tests all agree on how many chunks a request produces.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use super::budget::MemoryBudget;
use super::error::EstimateError;

/// Default maximum number of points generated by one chunk.
pub const DEFAULT_CHUNK_LIMIT: usize = 1_000_000;

/// Maximum number of points a single chunk may generate.
///
/// Always positive. Two `f64` buffers of this length must fit comfortably in
/// memory; see [`MemoryBudget`].
///
/// # Examples
///
/// ```rust
/// use pi_core::ChunkLimit;
///
/// let limit = ChunkLimit::new(250_000).unwrap();
/// assert_eq!(limit.get(), 250_000);
/// assert!(ChunkLimit::new(0).is_err());
/// assert_eq!(ChunkLimit::default().get(), 1_000_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkLimit(NonZeroUsize);

impl ChunkLimit {
    /// Creates a chunk limit.
    ///
    /// # Errors
    ///
    /// Returns `EstimateError::InvalidArgument` if `limit` is zero.
    pub fn new(limit: usize) -> Result<Self, EstimateError> {
        NonZeroUsize::new(limit)
            .map(Self)
            .ok_or_else(|| EstimateError::invalid("limit", "chunk limit must be positive"))
    }

    /// Largest chunk limit whose buffers fit in `budget`.
    ///
    /// # Errors
    ///
    /// Returns `EstimateError::InvalidArgument` if the budget cannot hold a
    /// single point.
    pub fn from_budget(budget: MemoryBudget) -> Result<Self, EstimateError> {
        NonZeroUsize::new(budget.max_points()).map(Self).ok_or_else(|| {
            EstimateError::invalid(
                "memory_budget",
                format!(
                    "{} bytes cannot hold a single point",
                    budget.max_bytes()
                ),
            )
        })
    }

    /// Returns the limit as a plain count.
    #[inline]
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Buffer bytes held by one full chunk.
    #[inline]
    pub fn chunk_bytes(self) -> usize {
        MemoryBudget::chunk_bytes(self.get())
    }
}

impl Default for ChunkLimit {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_CHUNK_LIMIT).unwrap_or(NonZeroUsize::MIN))
    }
}

impl fmt::Display for ChunkLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What to do with samples left over when the total is not a multiple of
/// the chunk limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RemainderPolicy {
    /// Round the total down to a multiple of the limit.
    ///
    /// Every dispatched chunk draws exactly `limit` points and the leftover
    /// samples are never generated.
    #[default]
    Truncate,

    /// Append a final, smaller chunk holding the leftover samples.
    ///
    /// Exactly the requested number of points is drawn; chunk estimates are
    /// combined as a sample-weighted mean.
    PartialChunk,
}

impl RemainderPolicy {
    /// Lower-case name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            RemainderPolicy::Truncate => "truncate",
            RemainderPolicy::PartialChunk => "partial",
        }
    }
}

impl FromStr for RemainderPolicy {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truncate" => Ok(RemainderPolicy::Truncate),
            "partial" | "partial-chunk" | "partial_chunk" => Ok(RemainderPolicy::PartialChunk),
            other => Err(EstimateError::invalid(
                "remainder",
                format!("unknown policy '{}', expected 'truncate' or 'partial'", other),
            )),
        }
    }
}

impl fmt::Display for RemainderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved partition of one estimation request.
///
/// A request of `n <= limit` samples is a single direct chunk of `n` points.
/// Larger requests become `n / limit` full chunks of `limit` points, plus an
/// optional tail chunk under [`RemainderPolicy::PartialChunk`].
///
/// # Examples
///
/// ```rust
/// use pi_core::{ChunkLimit, ChunkPlan, RemainderPolicy};
///
/// let limit = ChunkLimit::new(1_000_000).unwrap();
///
/// let plan = ChunkPlan::new(5_000_000, limit, RemainderPolicy::Truncate).unwrap();
/// assert_eq!(plan.chunk_count(), 5);
/// assert!(!plan.is_direct());
///
/// let plan = ChunkPlan::new(1_500_000, limit, RemainderPolicy::PartialChunk).unwrap();
/// assert_eq!(plan.chunk_sizes().collect::<Vec<_>>(), vec![1_000_000, 500_000]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkPlan {
    requested: usize,
    limit: ChunkLimit,
    chunk_size: usize,
    full_chunks: usize,
    tail: usize,
}

impl ChunkPlan {
    /// Partitions `n` samples into chunks of at most `limit` points.
    ///
    /// # Errors
    ///
    /// Returns `EstimateError::InvalidArgument` if `n` is zero.
    pub fn new(n: usize, limit: ChunkLimit, policy: RemainderPolicy) -> Result<Self, EstimateError> {
        if n == 0 {
            return Err(EstimateError::invalid("n", "sample count must be at least 1"));
        }

        if n <= limit.get() {
            return Ok(Self {
                requested: n,
                limit,
                chunk_size: n,
                full_chunks: 1,
                tail: 0,
            });
        }

        let tail = match policy {
            RemainderPolicy::Truncate => 0,
            RemainderPolicy::PartialChunk => n % limit.get(),
        };

        Ok(Self {
            requested: n,
            limit,
            chunk_size: limit.get(),
            full_chunks: n / limit.get(),
            tail,
        })
    }

    /// Number of samples the caller asked for.
    #[inline]
    pub fn samples_requested(&self) -> usize {
        self.requested
    }

    /// The limit the plan was built against.
    #[inline]
    pub fn limit(&self) -> ChunkLimit {
        self.limit
    }

    /// Number of chunks to run.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.full_chunks + usize::from(self.tail > 0)
    }

    /// Sample count of the chunk at `index`.
    ///
    /// Indices past the last chunk yield zero.
    #[inline]
    pub fn chunk_size(&self, index: usize) -> usize {
        if index < self.full_chunks {
            self.chunk_size
        } else if index == self.full_chunks {
            self.tail
        } else {
            0
        }
    }

    /// Sample counts of every chunk, in dispatch order.
    pub fn chunk_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.chunk_count()).map(move |index| self.chunk_size(index))
    }

    /// Total points that will actually be generated.
    #[inline]
    pub fn samples_drawn(&self) -> usize {
        self.full_chunks * self.chunk_size + self.tail
    }

    /// Requested points that will never be generated.
    #[inline]
    pub fn samples_dropped(&self) -> usize {
        self.requested - self.samples_drawn()
    }

    /// `true` when the request fits in one chunk and skips the worker pool.
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.requested <= self.limit.get()
    }

    /// `true` when every chunk has the same size.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.tail == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn limit(n: usize) -> ChunkLimit {
        ChunkLimit::new(n).unwrap()
    }

    #[test]
    fn test_chunk_limit_rejects_zero() {
        let err = ChunkLimit::new(0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_chunk_limit_from_budget() {
        let limit = ChunkLimit::from_budget(MemoryBudget::from_mb(16)).unwrap();
        assert_eq!(limit.get(), 1_048_576);
        assert_eq!(limit.chunk_bytes(), 16 * 1024 * 1024);

        assert!(ChunkLimit::from_budget(MemoryBudget::new(15)).is_err());
    }

    #[test]
    fn test_chunk_limit_default() {
        assert_eq!(ChunkLimit::default().get(), DEFAULT_CHUNK_LIMIT);
        assert_eq!(ChunkLimit::default().to_string(), "1000000");
    }

    #[test]
    fn test_remainder_policy_parsing() {
        assert_eq!(
            "truncate".parse::<RemainderPolicy>().unwrap(),
            RemainderPolicy::Truncate
        );
        assert_eq!(
            "PARTIAL".parse::<RemainderPolicy>().unwrap(),
            RemainderPolicy::PartialChunk
        );
        assert_eq!(
            "partial-chunk".parse::<RemainderPolicy>().unwrap(),
            RemainderPolicy::PartialChunk
        );
        assert!("pad".parse::<RemainderPolicy>().is_err());
    }

    #[test]
    fn test_remainder_policy_display_round_trips() {
        for policy in [RemainderPolicy::Truncate, RemainderPolicy::PartialChunk] {
            assert_eq!(policy.to_string().parse::<RemainderPolicy>().unwrap(), policy);
        }
        assert_eq!(RemainderPolicy::default(), RemainderPolicy::Truncate);
    }

    #[test]
    fn test_plan_rejects_zero_samples() {
        let err = ChunkPlan::new(0, limit(10), RemainderPolicy::Truncate).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_plan_direct_when_within_limit() {
        let plan = ChunkPlan::new(1_000_000, limit(1_000_000), RemainderPolicy::Truncate).unwrap();
        assert!(plan.is_direct());
        assert_eq!(plan.chunk_count(), 1);
        assert_eq!(plan.chunk_size(0), 1_000_000);
        assert_eq!(plan.samples_dropped(), 0);

        let plan = ChunkPlan::new(7, limit(10), RemainderPolicy::PartialChunk).unwrap();
        assert!(plan.is_direct());
        assert_eq!(plan.chunk_sizes().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn test_plan_exact_multiple() {
        let plan = ChunkPlan::new(5_000_000, limit(1_000_000), RemainderPolicy::Truncate).unwrap();
        assert!(!plan.is_direct());
        assert!(plan.is_uniform());
        assert_eq!(plan.chunk_count(), 5);
        assert!(plan.chunk_sizes().all(|size| size == 1_000_000));
        assert_eq!(plan.samples_drawn(), 5_000_000);
    }

    #[test]
    fn test_plan_truncates_remainder() {
        let plan = ChunkPlan::new(1_500_000, limit(1_000_000), RemainderPolicy::Truncate).unwrap();
        assert!(!plan.is_direct());
        assert_eq!(plan.chunk_count(), 1);
        assert_eq!(plan.samples_drawn(), 1_000_000);
        assert_eq!(plan.samples_dropped(), 500_000);
    }

    #[test]
    fn test_plan_partial_chunk_keeps_remainder() {
        let plan =
            ChunkPlan::new(1_500_000, limit(1_000_000), RemainderPolicy::PartialChunk).unwrap();
        assert_eq!(plan.chunk_count(), 2);
        assert!(!plan.is_uniform());
        assert_eq!(plan.chunk_size(1), 500_000);
        assert_eq!(plan.chunk_size(2), 0);
        assert_eq!(plan.samples_drawn(), 1_500_000);
        assert_eq!(plan.samples_dropped(), 0);
    }

    proptest! {
        #[test]
        fn prop_plan_never_exceeds_limit(n in 1usize..10_000_000, l in 1usize..2_000_000) {
            for policy in [RemainderPolicy::Truncate, RemainderPolicy::PartialChunk] {
                let plan = ChunkPlan::new(n, limit(l), policy).unwrap();
                prop_assert!(plan.chunk_sizes().all(|size| size >= 1 && size <= l));
                prop_assert_eq!(plan.chunk_sizes().sum::<usize>(), plan.samples_drawn());
                prop_assert!(plan.samples_drawn() <= n);
            }
        }

        #[test]
        fn prop_truncate_drops_less_than_one_chunk(n in 1usize..10_000_000, l in 1usize..2_000_000) {
            let plan = ChunkPlan::new(n, limit(l), RemainderPolicy::Truncate).unwrap();
            prop_assert!(plan.samples_dropped() < l);
            if n > l {
                prop_assert_eq!(plan.chunk_count(), n / l);
            }
        }
    }
}
