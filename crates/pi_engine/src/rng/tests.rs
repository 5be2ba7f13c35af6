//! Unit tests for the RNG module.
//!
//! - Seed reproducibility
//! - Uniform range
//! - Chunk stream independence
//! - Statistical properties via property-based testing

use super::*;
use proptest::prelude::*;

/// Same seed, same sequence.
#[test]
fn test_seed_reproducibility() {
    let mut rng1 = PiRng::from_seed(12345);
    let mut rng2 = PiRng::from_seed(12345);

    for _ in 0..100 {
        assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut rng1 = PiRng::from_seed(1);
    let mut rng2 = PiRng::from_seed(2);

    let a: Vec<f64> = (0..16).map(|_| rng1.gen_uniform()).collect();
    let b: Vec<f64> = (0..16).map(|_| rng2.gen_uniform()).collect();
    assert_ne!(a, b);
}

#[test]
fn test_uniform_range() {
    let mut rng = PiRng::from_seed(42);

    for _ in 0..10_000 {
        let value = rng.gen_uniform();
        assert!(value >= 0.0, "Uniform value {} is below 0", value);
        assert!(value < 1.0, "Uniform value {} is >= 1", value);
    }
}

/// Batch fill matches one-at-a-time generation from the same seed.
#[test]
fn test_fill_uniform_matches_single_draws() {
    let mut batch_rng = PiRng::from_seed(7);
    let mut single_rng = PiRng::from_seed(7);

    let mut buffer = vec![0.0; 256];
    batch_rng.fill_uniform(&mut buffer);

    for &value in &buffer {
        assert_eq!(value, single_rng.gen_uniform());
    }
}

#[test]
fn test_empty_buffer() {
    let mut rng = PiRng::from_seed(42);
    let mut empty: Vec<f64> = vec![];

    rng.fill_uniform(&mut empty);
    assert!(empty.is_empty());
}

#[test]
fn test_entropy_seed_is_recorded() {
    let mut rng = PiRng::from_entropy();
    let mut replay = PiRng::from_seed(rng.seed());

    assert_eq!(rng.gen_uniform(), replay.gen_uniform());
}

#[test]
fn test_chunk_streams_are_reproducible() {
    let mut a = PiRng::for_chunk(99, 4);
    let mut b = PiRng::for_chunk(99, 4);

    assert_eq!(a.seed(), split_seed(99, 4));
    for _ in 0..32 {
        assert_eq!(a.gen_uniform(), b.gen_uniform());
    }
}

/// Chunk streams must not replay the base stream or each other.
#[test]
fn test_chunk_streams_are_distinct() {
    let mut base = PiRng::from_seed(99);
    let first: Vec<f64> = (0..8).map(|_| base.gen_uniform()).collect();

    let mut seen = vec![first];
    for index in 0..8 {
        let mut rng = PiRng::for_chunk(99, index);
        let head: Vec<f64> = (0..8).map(|_| rng.gen_uniform()).collect();
        assert!(!seen.contains(&head), "chunk {} repeats an earlier stream", index);
        seen.push(head);
    }
}

/// Mean of U[0,1) is 1/2 and variance 1/12.
#[test]
fn test_uniform_moments() {
    let mut rng = PiRng::from_seed(2024);
    let mut buffer = vec![0.0; 200_000];
    rng.fill_uniform(&mut buffer);

    let n = buffer.len() as f64;
    let mean = buffer.iter().sum::<f64>() / n;
    let variance = buffer.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    assert!((mean - 0.5).abs() < 0.01, "mean {} too far from 0.5", mean);
    assert!(
        (variance - 1.0 / 12.0).abs() < 0.005,
        "variance {} too far from 1/12",
        variance
    );
}

proptest! {
    #[test]
    fn prop_fill_uniform_in_range(seed in any::<u64>(), len in 0usize..512) {
        let mut rng = PiRng::from_seed(seed);
        let mut buffer = vec![0.0; len];
        rng.fill_uniform(&mut buffer);
        prop_assert!(buffer.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn prop_split_seed_separates_indices(seed in any::<u64>(), index in 0usize..1_000_000) {
        prop_assert_ne!(split_seed(seed, index), split_seed(seed, index + 1));
    }
}
