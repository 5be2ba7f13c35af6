//! pi-estimate - Chunked Monte Carlo estimation of π
//!
//! Command line entry point for the chunked estimator.
//!
//! # Commands
//!
//! - `pi-estimate estimate` - Estimate π with the chunked parallel estimator
//! - `pi-estimate compare` - Time the chunked estimator against the naive reference
//! - `pi-estimate check` - Show host and effective configuration
//!
//! Settings come from defaults, then `--config` (or `pi.toml` when present),
//! then `PI_*` environment variables, then command line flags.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use pi_engine::RemainderPolicy;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::{CliConfig, Overrides};
pub use error::{CliError, Result};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "pi.toml";

/// Chunked Monte Carlo π estimator
#[derive(Parser)]
#[command(name = "pi-estimate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Estimator settings shared by the run commands
#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Maximum points per chunk
    #[arg(short = 'l', long, conflicts_with = "memory_mb")]
    chunk_limit: Option<usize>,

    /// Per-chunk memory budget in MB (sets the chunk limit)
    #[arg(short, long)]
    memory_mb: Option<usize>,

    /// Worker threads (defaults to the CPU count)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Base seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Remainder policy (truncate, partial)
    #[arg(short, long)]
    remainder: Option<RemainderPolicy>,
}

impl RunArgs {
    fn overrides(&self, samples: Option<usize>) -> Overrides {
        Overrides {
            samples,
            chunk_limit: self.chunk_limit,
            memory_mb: self.memory_mb,
            threads: self.threads,
            seed: self.seed,
            remainder: self.remainder,
            log_level: None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate π with the chunked parallel estimator
    Estimate {
        /// Number of samples to draw (default 10^8)
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Time the chunked estimator against the naive reference
    Compare {
        /// Number of samples for both estimators
        #[arg(short = 'n', long, default_value = "10000000")]
        samples: usize,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Show host and effective configuration
    Check,
}

impl Commands {
    fn overrides(&self) -> Overrides {
        match self {
            Commands::Estimate { samples, run } => run.overrides(*samples),
            Commands::Compare { run, .. } => run.overrides(None),
            Commands::Check => Overrides::default(),
        }
    }
}

/// Resolve the config file and merge every configuration source.
fn load_config(explicit: Option<&Path>, overrides: &Overrides) -> Result<CliConfig> {
    let file = match explicit {
        Some(path) if !path.exists() => {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    };

    Ok(config::build_config(file.as_deref(), overrides)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), &cli.command.overrides())?;

    // Initialise tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    if cli.verbose {
        debug!("Verbose mode enabled");
    }
    debug!(?config, "Effective configuration");

    match cli.command {
        Commands::Estimate { .. } => commands::estimate::run(&config).map(|_| ()),
        Commands::Compare { samples, .. } => commands::compare::run(&config, samples).map(|_| ()),
        Commands::Check => commands::check::run(&config),
    }
}
