//! # pi_core: Foundation Types for Chunked Monte Carlo Estimation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pi_core is the bottom layer of the workspace, providing:
//! - The error taxonomy shared by every estimator (`types::error`)
//! - Memory ceilings for a single chunk (`types::budget`)
//! - Chunk sizing and partitioning of a sample count (`types::chunk`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pi_* crates and a single external
//! dependency:
//! - thiserror: Derive macros for the error enums
//!
//! ## Usage Examples
//!
//! ```rust
//! use pi_core::types::{ChunkLimit, ChunkPlan, MemoryBudget, RemainderPolicy};
//!
//! // One chunk holds two f64 buffers, so 16 MB buys a 1,048,576-point chunk
//! let limit = ChunkLimit::from_budget(MemoryBudget::from_mb(16)).unwrap();
//! assert_eq!(limit.get(), 1_048_576);
//!
//! // 1.5M samples with a 1M limit: one full chunk, the remainder is dropped
//! let limit = ChunkLimit::new(1_000_000).unwrap();
//! let plan = ChunkPlan::new(1_500_000, limit, RemainderPolicy::Truncate).unwrap();
//! assert_eq!(plan.chunk_count(), 1);
//! assert_eq!(plan.samples_dropped(), 500_000);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod types;

pub use types::{ChunkLimit, ChunkPlan, EstimateError, MemoryBudget, RemainderPolicy};
