//! `run` command implementation.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use collector::{SensorService, StreamCollector, TcpSensorService};
use contracts::{CapturedRecord, RunBlueprint, StreamId};
use dispatcher::ReportDispatcher;
use drift_engine::DriftEngine;
use ingestion::StreamDecoder;
use observability::record_drift_report;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::summary::{print_collection_overview, print_report_summary};

/// Execute the `run` command
pub async fn run_collection(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    apply_overrides(&mut blueprint, args);

    info!(
        host = %blueprint.collector.host,
        port_a = blueprint.collector.port_a,
        port_b = blueprint.collector.port_b,
        duration_s = blueprint.collector.duration_s,
        threshold_ms = blueprint.analyzer.sync_threshold_ms,
        sinks = blueprint.sinks.len(),
        "Configuration loaded"
    );

    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        return Ok(());
    }

    if args.metrics_port > 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let (records_a, records_b) = collect_streams(&blueprint).await?;

    if let Some(dir) = &args.save_records {
        save_records(dir, &records_a, &records_b)?;
    }

    print_collection_overview(
        &blueprint.analyzer.stream_a.label,
        &blueprint.analyzer.stream_b.label,
        &records_a,
        &records_b,
    );

    analyze_and_dispatch(&blueprint, &records_a, &records_b).await
}

fn apply_overrides(blueprint: &mut RunBlueprint, args: &RunArgs) {
    if let Some(ref host) = args.host {
        info!(host = %host, "Overriding service host from CLI");
        blueprint.collector.host = host.clone();
    }
    if let Some(duration) = args.duration {
        info!(duration_s = duration, "Overriding collection duration from CLI");
        blueprint.collector.duration_s = duration;
    }
    if let Some(threshold) = args.threshold_ms {
        info!(threshold_ms = threshold, "Overriding sync threshold from CLI");
        blueprint.analyzer.sync_threshold_ms = threshold;
    }
}

/// Connect to both services, drain stale data, and poll for the configured
/// duration.
async fn collect_streams(
    blueprint: &RunBlueprint,
) -> Result<(Vec<CapturedRecord>, Vec<CapturedRecord>)> {
    let timeout = Duration::from_secs(blueprint.collector.request_timeout_s);

    let mut service_a = TcpSensorService::new(
        blueprint.analyzer.stream_a.label.clone(),
        blueprint.collector.host.clone(),
        blueprint.collector.port_a,
        timeout,
    );
    let mut service_b = TcpSensorService::new(
        blueprint.analyzer.stream_b.label.clone(),
        blueprint.collector.host.clone(),
        blueprint.collector.port_b,
        timeout,
    );

    service_a
        .connect()
        .await
        .with_context(|| format!("connecting to '{}'", blueprint.analyzer.stream_a.label))?;
    service_b
        .connect()
        .await
        .with_context(|| format!("connecting to '{}'", blueprint.analyzer.stream_b.label))?;

    let stream_collector = StreamCollector::new(blueprint.collector.clone());
    stream_collector
        .drain(&mut service_a, &mut service_b)
        .await
        .context("draining device buffers")?;

    let collection = tokio::select! {
        result = stream_collector.collect(&mut service_a, &mut service_b) => {
            result.context("collecting stream data")?
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Collection interrupted");
            anyhow::bail!("collection interrupted before completion");
        }
    };

    if let Err(e) = service_a.close().await {
        warn!(error = %e, "failed to close stream A service");
    }
    if let Err(e) = service_b.close().await {
        warn!(error = %e, "failed to close stream B service");
    }

    Ok(collection)
}

fn save_records(
    dir: &Path,
    records_a: &[CapturedRecord],
    records_b: &[CapturedRecord],
) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    for (name, records) in [("records_a.json", records_a), ("records_b.json", records_b)] {
        let path = dir.join(name);
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer(std::io::BufWriter::new(file), records)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), count = records.len(), "records saved");
    }

    Ok(())
}

/// Decode, analyze, dispatch, and summarize. Shared with `analyze`.
pub(crate) async fn analyze_and_dispatch(
    blueprint: &RunBlueprint,
    records_a: &[CapturedRecord],
    records_b: &[CapturedRecord],
) -> Result<()> {
    let decoder_a = StreamDecoder::new(StreamId::A, blueprint.analyzer.stream_a.clone());
    let decoder_b = StreamDecoder::new(StreamId::B, blueprint.analyzer.stream_b.clone());
    let packets_a = decoder_a.decode_batch(records_a);
    let packets_b = decoder_b.decode_batch(records_b);

    let engine = DriftEngine::new(blueprint.analyzer.clone());
    let report = engine
        .analyze(&packets_a, &packets_b)
        .context("drift analysis failed")?;

    record_drift_report(&report);

    let dispatcher = ReportDispatcher::new(blueprint.clone());
    dispatcher
        .dispatch(&report)
        .await
        .context("dispatching report to sinks")?;

    print_report_summary(
        &report,
        &blueprint.analyzer.stream_a.label,
        &blueprint.analyzer.stream_b.label,
    );

    if report.success {
        Ok(())
    } else {
        anyhow::bail!("synchronization check failed")
    }
}
