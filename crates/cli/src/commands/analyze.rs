//! `analyze` command implementation.
//!
//! Offline mode: re-runs the drift analysis over record files saved by
//! `run --save-records`. The engine is idempotent, so re-analysis of the
//! same records with the same configuration reproduces the same report.

use std::path::Path;

use anyhow::{Context, Result};
use contracts::CapturedRecord;
use tracing::info;

use crate::cli::AnalyzeArgs;
use crate::commands::run::analyze_and_dispatch;

/// Execute the `analyze` command
pub async fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if let Some(threshold) = args.threshold_ms {
        info!(threshold_ms = threshold, "Overriding sync threshold from CLI");
        blueprint.analyzer.sync_threshold_ms = threshold;
    }

    let records_a = load_records(&args.records_a)?;
    let records_b = load_records(&args.records_b)?;

    info!(
        records_a = records_a.len(),
        records_b = records_b.len(),
        "records loaded, analyzing"
    );

    analyze_and_dispatch(&blueprint, &records_a, &records_b).await
}

fn load_records(path: &Path) -> Result<Vec<CapturedRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading record file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing record file {}", path.display()))
}
