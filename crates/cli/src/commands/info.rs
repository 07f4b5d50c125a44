//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{RunBlueprint, StreamConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    analyzer: AnalyzerInfo,
    collector: CollectorInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sinks: Vec<SinkInfo>,
}

#[derive(Serialize)]
struct AnalyzerInfo {
    sync_threshold_ms: f64,
    nominal_interval_s: f64,
    stream_a: StreamInfo,
    stream_b: StreamInfo,
}

#[derive(Serialize)]
struct StreamInfo {
    label: String,
    sampling_rate_hz: f64,
    magic_sentinel: i64,
    scale_factor: i64,
    expected_samples_per_interval: u64,
}

#[derive(Serialize)]
struct CollectorInfo {
    host: String,
    port_a: u16,
    port_b: u16,
    poll_interval_s: f64,
    duration_s: u64,
}

#[derive(Serialize)]
struct SinkInfo {
    name: String,
    sink_type: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&blueprint);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint, args);
    }

    Ok(())
}

fn build_config_info(blueprint: &RunBlueprint) -> ConfigInfo {
    ConfigInfo {
        analyzer: AnalyzerInfo {
            sync_threshold_ms: blueprint.analyzer.sync_threshold_ms,
            nominal_interval_s: blueprint.analyzer.nominal_interval_s,
            stream_a: build_stream_info(blueprint, &blueprint.analyzer.stream_a),
            stream_b: build_stream_info(blueprint, &blueprint.analyzer.stream_b),
        },
        collector: CollectorInfo {
            host: blueprint.collector.host.clone(),
            port_a: blueprint.collector.port_a,
            port_b: blueprint.collector.port_b,
            poll_interval_s: blueprint.collector.poll_interval_s,
            duration_s: blueprint.collector.duration_s,
        },
        sinks: blueprint
            .sinks
            .iter()
            .map(|s| SinkInfo {
                name: s.name.clone(),
                sink_type: format!("{:?}", s.sink_type).to_lowercase(),
            })
            .collect(),
    }
}

fn build_stream_info(blueprint: &RunBlueprint, stream: &StreamConfig) -> StreamInfo {
    StreamInfo {
        label: stream.label.clone(),
        sampling_rate_hz: stream.sampling_rate_hz,
        magic_sentinel: stream.magic_sentinel,
        scale_factor: stream.scale_factor,
        expected_samples_per_interval: blueprint.analyzer.expected_samples_for(stream),
    }
}

fn print_config_info(blueprint: &RunBlueprint, args: &InfoArgs) {
    println!("Analyzer:");
    println!(
        "  sync threshold:   {} ms",
        blueprint.analyzer.sync_threshold_ms
    );
    println!(
        "  marker interval:  {} s",
        blueprint.analyzer.nominal_interval_s
    );

    for (name, stream) in [
        ("stream A", &blueprint.analyzer.stream_a),
        ("stream B", &blueprint.analyzer.stream_b),
    ] {
        println!(
            "  {}: '{}' @ {} Hz",
            name, stream.label, stream.sampling_rate_hz
        );
        if args.streams {
            println!("    magic sentinel:   {}", stream.magic_sentinel);
            println!("    scale factor:     {}", stream.scale_factor);
            println!(
                "    expected samples: {}",
                blueprint.analyzer.expected_samples_for(stream)
            );
        }
    }

    println!("Collector:");
    println!(
        "  services:  {}:{} / {}:{}",
        blueprint.collector.host,
        blueprint.collector.port_a,
        blueprint.collector.host,
        blueprint.collector.port_b
    );
    println!(
        "  cadence:   every {} s for {} s",
        blueprint.collector.poll_interval_s, blueprint.collector.duration_s
    );

    if args.sinks {
        println!("Sinks:");
        if blueprint.sinks.is_empty() {
            println!("  (none)");
        }
        for sink in &blueprint.sinks {
            println!("  {} ({:?})", sink.name, sink.sink_type);
        }
    } else {
        println!("Sinks: {}", blueprint.sinks.len());
    }
}
