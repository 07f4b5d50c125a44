//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::RunBlueprint;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    sync_threshold_ms: f64,
    stream_a: String,
    stream_b: String,
    host: String,
    duration_s: u64,
    sink_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    sync_threshold_ms: blueprint.analyzer.sync_threshold_ms,
                    stream_a: describe_stream(&blueprint, true),
                    stream_b: describe_stream(&blueprint, false),
                    host: blueprint.collector.host.clone(),
                    duration_s: blueprint.collector.duration_s,
                    sink_count: blueprint.sinks.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn describe_stream(blueprint: &RunBlueprint, is_a: bool) -> String {
    let stream = if is_a {
        &blueprint.analyzer.stream_a
    } else {
        &blueprint.analyzer.stream_b
    };
    format!("{} @ {} Hz", stream.label, stream.sampling_rate_hz)
}

fn collect_warnings(blueprint: &RunBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.collector.poll_interval_s > 1.0 {
        warnings.push(format!(
            "poll_interval_s = {} is coarse; marker packets may arrive in large bursts",
            blueprint.collector.poll_interval_s
        ));
    }

    let min_interval = blueprint.analyzer.nominal_interval_s * 3.0;
    if (blueprint.collector.duration_s as f64) < min_interval {
        warnings.push(format!(
            "duration_s = {} captures fewer than 3 marker intervals; statistics will be weak",
            blueprint.collector.duration_s
        ));
    }

    if blueprint.sinks.is_empty() {
        warnings.push("no sinks configured; results will only appear in the summary".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("Configuration OK: {}", result.config_path);
        if let Some(summary) = &result.summary {
            println!("  threshold:  {} ms", summary.sync_threshold_ms);
            println!("  stream A:   {}", summary.stream_a);
            println!("  stream B:   {}", summary.stream_b);
            println!("  host:       {}", summary.host);
            println!("  duration:   {} s", summary.duration_s);
            println!("  sinks:      {}", summary.sink_count);
        }
        if let Some(warnings) = &result.warnings {
            for warning in warnings {
                println!("  warning: {}", warning);
            }
        }
    } else {
        println!("Configuration INVALID: {}", result.config_path);
        if let Some(error) = &result.error {
            println!("  error: {}", error);
        }
    }
}
