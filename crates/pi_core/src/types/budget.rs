//! Memory budget for a single chunk.
//!
//! A chunk materialises two coordinate buffers of `f64`, so its footprint is
//! `2 * limit * size_of::<f64>()` bytes. [`MemoryBudget`] caps that figure
//! and converts it into the largest chunk limit that fits.

/// Bytes held per sampled point: one `f64` for x and one for y.
pub const BYTES_PER_POINT: usize = 2 * std::mem::size_of::<f64>();

/// Maximum buffer memory one chunk may hold.
///
/// # Example
///
/// ```rust
/// use pi_core::MemoryBudget;
///
/// let budget = MemoryBudget::from_mb(16);
/// assert_eq!(budget.max_bytes(), 16 * 1024 * 1024);
/// assert_eq!(budget.max_points(), 1_048_576);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryBudget {
    /// Maximum memory usage in bytes
    max_bytes: usize,
}

impl MemoryBudget {
    /// Creates a new memory budget with the specified maximum in bytes.
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Creates a memory budget from megabytes.
    #[inline]
    pub fn from_mb(mb: usize) -> Self {
        Self::new(mb.saturating_mul(1024 * 1024))
    }

    /// Creates a memory budget from gigabytes.
    #[inline]
    pub fn from_gb(gb: usize) -> Self {
        Self::new(gb.saturating_mul(1024 * 1024 * 1024))
    }

    /// Returns the maximum memory in bytes.
    #[inline]
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Returns how many points fit in the budget.
    #[inline]
    pub fn max_points(&self) -> usize {
        self.max_bytes / BYTES_PER_POINT
    }

    /// Buffer bytes needed by one chunk of `points` samples.
    #[inline]
    pub fn chunk_bytes(points: usize) -> usize {
        points.saturating_mul(BYTES_PER_POINT)
    }

    /// Checks whether a chunk of `points` samples fits in the budget.
    #[inline]
    pub fn fits(&self, points: usize) -> bool {
        Self::chunk_bytes(points) <= self.max_bytes
    }

    /// Returns the usage as a percentage of the budget.
    #[inline]
    pub fn usage_percentage(&self, points: usize) -> f64 {
        if self.max_bytes == 0 {
            return 100.0;
        }
        (Self::chunk_bytes(points) as f64 / self.max_bytes as f64) * 100.0
    }
}

impl Default for MemoryBudget {
    /// Budget that exactly fits the default chunk limit of 1,000,000 points.
    fn default() -> Self {
        Self::new(Self::chunk_bytes(super::chunk::DEFAULT_CHUNK_LIMIT))
    }
}
