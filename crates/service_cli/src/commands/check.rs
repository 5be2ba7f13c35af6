//! Check command implementation
//!
//! Prints the host parallelism, the effective configuration and how a run of
//! the configured size would be split.

use pi_engine::{ChunkLimit, ChunkPlan, MemoryBudget};
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");

    let estimator = config.to_estimator_config()?;
    let limit = estimator.chunk_limit();
    let plan = ChunkPlan::new(config.samples, limit, estimator.remainder())?;
    let threads = estimator.effective_threads(plan.chunk_count());

    println!("Host");
    println!("  CPUs:            {}", num_cpus::get());
    println!("Configuration");
    println!("  Samples:         {}", config.samples);
    println!("  Chunk limit:     {}", limit);
    if let Some(mb) = config.memory_mb {
        println!("  Memory budget:   {} MB", mb);
    }
    if let Some((usage, fits)) = budget_usage(config, limit) {
        println!(
            "  Budget usage:    {:.1}%{}",
            usage,
            if fits { "" } else { " (over budget)" }
        );
    }
    println!("  Remainder:       {}", estimator.remainder());
    match estimator.seed() {
        Some(seed) => println!("  Seed:            {}", seed),
        None => println!("  Seed:            (entropy)"),
    }
    println!("  Log level:       {}", config.log_level);
    println!("Plan");
    println!("  Chunks:          {}", plan.chunk_count());
    println!("  Threads:         {}", threads);
    println!("  Samples dropped: {}", plan.samples_dropped());
    println!(
        "  Chunk buffers:   {} bytes each",
        MemoryBudget::chunk_bytes(limit.get())
    );
    println!(
        "  Peak buffers:    {} bytes",
        estimator.peak_buffer_bytes(plan.chunk_count())
    );

    info!("Check complete");
    Ok(())
}

/// Share of the configured memory budget one chunk uses, and whether it fits.
fn budget_usage(config: &CliConfig, limit: ChunkLimit) -> Option<(f64, bool)> {
    config.memory_mb.map(|mb| {
        let budget = MemoryBudget::from_mb(mb);
        (budget.usage_percentage(limit.get()), budget.fits(limit.get()))
    })
}
