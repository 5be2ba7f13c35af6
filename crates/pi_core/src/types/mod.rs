//! Core types for chunked estimation.
//!
//! - [`error`]: `EstimateError` taxonomy
//! - [`budget`]: `MemoryBudget` for a single chunk's buffers
//! - [`chunk`]: `ChunkLimit`, `ChunkPlan` and `RemainderPolicy`

pub mod budget;
pub mod chunk;
pub mod error;

pub use budget::MemoryBudget;
pub use chunk::{ChunkLimit, ChunkPlan, RemainderPolicy, DEFAULT_CHUNK_LIMIT};
pub use error::EstimateError;
