//! Estimate command implementation
//!
//! Runs the chunked estimator at the configured depth and prints the result
//! next to the true value of π.

use std::f64::consts::PI;
use std::time::Instant;

use pi_engine::{ChunkedEstimator, EstimateReport};
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the estimate command
pub fn run(config: &CliConfig) -> Result<EstimateReport> {
    let estimator = ChunkedEstimator::new(config.to_estimator_config()?);

    info!("Starting estimation...");
    info!("  Samples: {}", config.samples);
    info!("  Chunk limit: {}", estimator.config().chunk_limit());
    info!("  Remainder: {}", estimator.config().remainder());

    let start = Instant::now();
    let report = estimator.run(config.samples)?;
    let elapsed = start.elapsed();

    println!("True value:     {:.10}", PI);
    println!("Estimate:       {:.10}", report.estimate);
    println!("Deviation:      {:.3e}", report.deviation());
    println!(
        "Chunks:         {} ({} threads{})",
        report.chunk_count,
        report.threads,
        if report.is_direct() { ", direct" } else { "" }
    );
    println!("Samples drawn:  {}", report.samples_drawn);
    if report.samples_dropped() > 0 {
        println!("Samples dropped: {}", report.samples_dropped());
    }
    println!("Seed:           {}", report.seed);
    println!("Elapsed:        {:.3} s", elapsed.as_secs_f64());

    info!("Estimation complete");
    Ok(report)
}
