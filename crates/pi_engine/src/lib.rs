//! # pi_engine (L2: Estimation Engine)
//!
//! Monte Carlo estimation of π with a bounded memory footprint.
//!
//! ## Layer 2 Role
//!
//! - Seedable random sources, one per chunk (`rng`)
//! - The chunk estimator: one bounded batch of points, one estimate (`chunk`)
//! - The chunked aggregator: partition, parallel dispatch, join, average
//!   (`aggregator`)
//! - Run configuration (`config`)
//! - A naive reference estimator for benchmarks (`reference`)
//!
//! ## Usage Example
//!
//! ```rust
//! use pi_engine::{estimate, estimate_chunked, ChunkedEstimator, EstimatorConfig, PiRng};
//!
//! // Single chunk with an explicit generator
//! let pi = estimate(100_000, &mut PiRng::from_seed(42)).unwrap();
//! assert!((3.0..3.3).contains(&pi));
//!
//! // Chunked, unseeded
//! let pi = estimate_chunked(300_000, 100_000).unwrap();
//! assert!((3.0..3.3).contains(&pi));
//!
//! // Chunked, seeded and reported
//! let config = EstimatorConfig::builder()
//!     .chunk_limit(100_000)
//!     .num_threads(2)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let report = ChunkedEstimator::new(config).run(300_000).unwrap();
//! assert_eq!(report.chunk_count, 3);
//! ```

#![warn(missing_docs)]

pub mod aggregator;
pub mod chunk;
pub mod config;
pub mod reference;
pub mod rng;

pub use aggregator::{estimate_chunked, ChunkedEstimator, EstimateReport};
pub use chunk::{estimate, ChunkWorkspace};
pub use config::{EstimatorConfig, EstimatorConfigBuilder};
pub use pi_core::{
    ChunkLimit, ChunkPlan, EstimateError, MemoryBudget, RemainderPolicy,
};
pub use pi_core::types::DEFAULT_CHUNK_LIMIT;
pub use rng::PiRng;
