//! Compare command implementation
//!
//! Times the chunked estimator against the naive reference on the same
//! sample count and prints the speed ratio.

use std::f64::consts::PI;
use std::time::Instant;

use pi_engine::reference::naive_estimate;
use pi_engine::{ChunkedEstimator, PiRng};
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Largest sample count the naive reference is run with.
///
/// The reference holds every point in memory at once (about 25 bytes each).
pub const MAX_REFERENCE_SAMPLES: usize = 20_000_000;

/// Timings and estimates from one comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub chunked: f64,
    /// Samples the chunked run actually drew (fewer than requested under truncation)
    pub chunked_samples: usize,
    pub naive: f64,
    pub chunked_secs: f64,
    pub naive_secs: f64,
}

impl Comparison {
    /// How many times faster the chunked estimator ran.
    pub fn speedup(&self) -> f64 {
        if self.chunked_secs > 0.0 {
            self.naive_secs / self.chunked_secs
        } else {
            f64::INFINITY
        }
    }
}

/// Run the compare command
pub fn run(config: &CliConfig, samples: usize) -> Result<Comparison> {
    if samples > MAX_REFERENCE_SAMPLES {
        return Err(CliError::InvalidArgument(format!(
            "compare supports at most {} samples, got {}",
            MAX_REFERENCE_SAMPLES, samples
        )));
    }

    let estimator = ChunkedEstimator::new(config.to_estimator_config()?);
    info!("Comparing estimators on {} samples...", samples);

    let start = Instant::now();
    let report = estimator.run(samples)?;
    let chunked_secs = start.elapsed().as_secs_f64();

    info!("Running naive reference (seed {})...", report.seed);
    let start = Instant::now();
    let naive = naive_estimate(samples, &mut PiRng::from_seed(report.seed))?;
    let naive_secs = start.elapsed().as_secs_f64();

    let comparison = Comparison {
        chunked: report.estimate,
        chunked_samples: report.samples_drawn,
        naive,
        chunked_secs,
        naive_secs,
    };

    println!("True value:  {:.10}", PI);
    println!(
        "Chunked:     {:.10}  ({:.3} s, {} samples in {} chunks)",
        comparison.chunked,
        comparison.chunked_secs,
        comparison.chunked_samples,
        report.chunk_count
    );
    println!(
        "Naive:       {:.10}  ({:.3} s, {} samples)",
        comparison.naive, comparison.naive_secs, samples
    );
    println!("Speedup:     {:.2}x", comparison.speedup());

    Ok(comparison)
}
