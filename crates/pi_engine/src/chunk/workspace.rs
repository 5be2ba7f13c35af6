//! Pre-allocated coordinate buffers for chunk estimation.

use pi_core::EstimateError;

/// Reusable x/y buffers for one worker.
///
/// Capacity only grows. A chunk of `n` points borrows the first `n`
/// elements of each buffer.
///
/// # Examples
///
/// ```rust
/// use pi_engine::chunk::ChunkWorkspace;
///
/// let mut ws = ChunkWorkspace::with_capacity(1_000);
/// assert_eq!(ws.capacity(), 1_000);
///
/// ws.ensure_capacity(500).unwrap();
/// assert_eq!(ws.capacity(), 1_000);
///
/// ws.ensure_capacity(2_000).unwrap();
/// assert_eq!(ws.capacity(), 2_000);
/// assert!(ws.ensure_capacity(usize::MAX / 4).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ChunkWorkspace {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl ChunkWorkspace {
    /// Creates a workspace sized for `points` samples.
    pub fn with_capacity(points: usize) -> Self {
        Self {
            xs: vec![0.0; points],
            ys: vec![0.0; points],
        }
    }

    /// Number of points the buffers can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.xs.len()
    }

    /// Grows both buffers to hold at least `points` samples.
    ///
    /// # Errors
    ///
    /// Returns `EstimateError::ExecutionFailure` if the buffers cannot be
    /// allocated. The workspace is left unchanged in that case.
    pub fn ensure_capacity(&mut self, points: usize) -> Result<(), EstimateError> {
        let additional = points.saturating_sub(self.xs.len());
        if additional == 0 {
            return Ok(());
        }

        for buffer in [&mut self.xs, &mut self.ys] {
            buffer.try_reserve_exact(additional).map_err(|e| {
                EstimateError::ExecutionFailure(format!(
                    "cannot allocate buffers for {} points: {}",
                    points, e
                ))
            })?;
        }
        self.xs.resize(points, 0.0);
        self.ys.resize(points, 0.0);
        Ok(())
    }

    /// Bytes currently held by the buffers.
    #[inline]
    pub fn memory_bytes(&self) -> usize {
        (self.xs.len() + self.ys.len()) * std::mem::size_of::<f64>()
    }

    /// Mutable views of the first `points` x and y coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `points` exceeds [`ChunkWorkspace::capacity`].
    #[inline]
    pub(crate) fn coordinates_mut(&mut self, points: usize) -> (&mut [f64], &mut [f64]) {
        (&mut self.xs[..points], &mut self.ys[..points])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let ws = ChunkWorkspace::default();
        assert_eq!(ws.capacity(), 0);
        assert_eq!(ws.memory_bytes(), 0);
    }

    #[test]
    fn test_memory_bytes() {
        let ws = ChunkWorkspace::with_capacity(1_000);
        assert_eq!(ws.memory_bytes(), 16_000);
    }

    #[test]
    fn test_ensure_capacity_only_grows() {
        let mut ws = ChunkWorkspace::with_capacity(100);
        ws.ensure_capacity(10).unwrap();
        assert_eq!(ws.capacity(), 100);
        ws.ensure_capacity(300).unwrap();
        assert_eq!(ws.capacity(), 300);
        assert_eq!(ws.memory_bytes(), 4_800);
    }

    #[test]
    fn test_ensure_capacity_unaddressable_is_execution_failure() {
        let mut ws = ChunkWorkspace::with_capacity(8);
        let err = ws.ensure_capacity(usize::MAX / 4).unwrap_err();
        assert!(err.is_execution_failure());
        assert_eq!(ws.capacity(), 8);
    }

    #[test]
    fn test_coordinates_mut_lengths() {
        let mut ws = ChunkWorkspace::with_capacity(10);
        let (xs, ys) = ws.coordinates_mut(4);
        assert_eq!(xs.len(), 4);
        assert_eq!(ys.len(), 4);
    }
}
