//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Syncmark - two-stream sync-marker drift analyzer
#[derive(Parser, Debug)]
#[command(
    name = "syncmark",
    author,
    version,
    about = "Sync-marker drift analyzer for paired sensor streams",
    long_about = "Validates that two independently clocked sensor data streams stay\n\
                  time-aligned and sample-rate-accurate. Polls both sensor services,\n\
                  reconstructs sample-accurate sync-marker times, matches markers across\n\
                  streams, and reports drift and sampling fidelity statistics."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SYNCMARK_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SYNCMARK_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect data from both services and analyze drift
    Run(RunArgs),

    /// Re-analyze previously saved record files
    Analyze(AnalyzeArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "run.toml", env = "SYNCMARK_CONFIG")]
    pub config: PathBuf,

    /// Override service host from configuration
    #[arg(long, env = "SYNCMARK_HOST")]
    pub host: Option<String>,

    /// Override collection duration in seconds
    #[arg(long, env = "SYNCMARK_DURATION")]
    pub duration: Option<u64>,

    /// Override sync threshold in milliseconds
    #[arg(long)]
    pub threshold_ms: Option<f64>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "SYNCMARK_METRICS_PORT")]
    pub metrics_port: u16,

    /// Save the captured raw records into this directory for later
    /// `syncmark analyze` runs
    #[arg(long)]
    pub save_records: Option<PathBuf>,

    /// Validate configuration and exit without collecting
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "run.toml", env = "SYNCMARK_CONFIG")]
    pub config: PathBuf,

    /// Stream A record file (JSON, as written by `run --save-records`)
    #[arg(long)]
    pub records_a: PathBuf,

    /// Stream B record file
    #[arg(long)]
    pub records_b: PathBuf,

    /// Override sync threshold in milliseconds
    #[arg(long)]
    pub threshold_ms: Option<f64>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "run.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "run.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show detailed stream settings
    #[arg(long)]
    pub streams: bool,

    /// Show sink configuration
    #[arg(long)]
    pub sinks: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
