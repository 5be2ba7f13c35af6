//! CLI configuration management
//!
//! Loads run settings from a TOML file, environment variables and command
//! line flags.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`PI_*`)
//! 3. Config file
//! 4. Default values

use std::path::Path;
use std::str::FromStr;

use pi_engine::{
    EstimateError, EstimatorConfig, MemoryBudget, RemainderPolicy, DEFAULT_CHUNK_LIMIT,
};
use serde::Deserialize;
use thiserror::Error;

/// Default number of samples for the `estimate` command.
pub const DEFAULT_SAMPLES: usize = 100_000_000;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid remainder policy: {0}. Must be one of: truncate, partial")]
    InvalidRemainder(String),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Run settings shared by every command
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Samples drawn by `estimate`
    pub samples: usize,
    /// Maximum points per chunk
    pub chunk_limit: usize,
    /// Per-chunk memory budget in MB; replaces `chunk_limit` when set
    pub memory_mb: Option<usize>,
    /// Worker pool size (defaults to the CPU count)
    pub threads: Option<usize>,
    /// Base seed for reproducible runs
    pub seed: Option<u64>,
    /// Remainder policy
    #[serde(deserialize_with = "deserialize_remainder")]
    pub remainder: RemainderPolicy,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_remainder<'de, D>(deserializer: D) -> Result<RemainderPolicy, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_remainder(&s).map_err(serde::de::Error::custom)
}

fn parse_remainder(s: &str) -> Result<RemainderPolicy, ConfigError> {
    RemainderPolicy::from_str(s).map_err(|_| ConfigError::InvalidRemainder(s.to_string()))
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            chunk_limit: DEFAULT_CHUNK_LIMIT,
            memory_mb: None,
            threads: None,
            seed: None,
            remainder: RemainderPolicy::Truncate,
            log_level: LogLevel::Info,
        }
    }
}

/// Command line overrides
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub samples: Option<usize>,
    pub chunk_limit: Option<usize>,
    pub memory_mb: Option<usize>,
    pub threads: Option<usize>,
    pub seed: Option<u64>,
    pub remainder: Option<RemainderPolicy>,
    pub log_level: Option<LogLevel>,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `PI_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply environment-style overrides from an arbitrary lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(samples) = lookup("PI_SAMPLES") {
            self.samples = parse_number("PI_SAMPLES", &samples)?;
        }
        if let Some(limit) = lookup("PI_CHUNK_LIMIT") {
            self.chunk_limit = parse_number("PI_CHUNK_LIMIT", &limit)?;
            self.memory_mb = None;
        }
        if let Some(mb) = lookup("PI_MEMORY_MB") {
            self.memory_mb = Some(parse_number("PI_MEMORY_MB", &mb)?);
        }
        if let Some(threads) = lookup("PI_THREADS") {
            self.threads = Some(parse_number("PI_THREADS", &threads)?);
        }
        if let Some(seed) = lookup("PI_SEED") {
            self.seed = Some(parse_number("PI_SEED", &seed)?);
        }
        if let Some(remainder) = lookup("PI_REMAINDER") {
            self.remainder = parse_remainder(&remainder)?;
        }
        if let Some(level) = lookup("PI_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &Overrides) {
        if let Some(samples) = cli.samples {
            self.samples = samples;
        }
        if let Some(limit) = cli.chunk_limit {
            self.chunk_limit = limit;
            self.memory_mb = None;
        }
        if let Some(mb) = cli.memory_mb {
            self.memory_mb = Some(mb);
        }
        if let Some(threads) = cli.threads {
            self.threads = Some(threads);
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(remainder) = cli.remainder {
            self.remainder = remainder;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
    }

    /// Build the engine configuration
    pub fn to_estimator_config(&self) -> Result<EstimatorConfig, EstimateError> {
        let mut builder = EstimatorConfig::builder()
            .chunk_limit(self.chunk_limit)
            .remainder(self.remainder);

        if let Some(mb) = self.memory_mb {
            builder = builder.memory_budget(MemoryBudget::from_mb(mb));
        }
        if let Some(threads) = self.threads {
            builder = builder.num_threads(threads);
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }

        builder.build()
    }
}

/// Build configuration from all sources
pub fn build_config(file: Option<&Path>, cli: &Overrides) -> Result<CliConfig, ConfigError> {
    let mut config = match file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env()?;
    config.merge_with_cli(cli);

    Ok(config)
}
