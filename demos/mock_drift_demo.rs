//! Mock Drift Demo
//!
//! Demonstrates the full analysis chain without any hardware: two mock
//! sensor services with a known 15 ms clock offset are polled for a few
//! seconds, decoded, and analyzed.
//!
//! Run with: cargo run --bin mock_drift_demo

use collector::{MockSensorService, MockServiceConfig, SensorService, StreamCollector};
use contracts::{AnalyzerConfig, CollectorConfig, StreamId};
use drift_engine::DriftEngine;
use ingestion::StreamDecoder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Mock Drift Demo");

    // Reference setup: ICG vs ECG, both at 400 Hz
    let analyzer = AnalyzerConfig::default();
    let start_time = 1_761_551_727.0;

    // ==== Stage 1: Two mock devices with a known 15 ms clock offset ====
    let mut icg = MockSensorService::new(MockServiceConfig {
        label: analyzer.stream_a.label.clone(),
        sampling_rate_hz: analyzer.stream_a.sampling_rate_hz,
        magic_sentinel: analyzer.stream_a.magic_sentinel,
        scale_factor: analyzer.stream_a.scale_factor,
        vector_arity: 5,
        samples_per_fetch: 80,
        start_time,
        clock_offset_s: 0.0,
        ..Default::default()
    });
    let mut ecg = MockSensorService::new(MockServiceConfig {
        label: analyzer.stream_b.label.clone(),
        sampling_rate_hz: analyzer.stream_b.sampling_rate_hz,
        magic_sentinel: analyzer.stream_b.magic_sentinel,
        scale_factor: analyzer.stream_b.scale_factor,
        vector_arity: 3,
        samples_per_fetch: 80,
        start_time,
        clock_offset_s: 0.015,
        ..Default::default()
    });

    icg.connect().await?;
    ecg.connect().await?;

    // ==== Stage 2: Poll both services for a few seconds ====
    let collector_config = CollectorConfig {
        host: "mock".to_string(),
        port_a: 0,
        port_b: 1,
        poll_interval_s: 0.05,
        duration_s: 4,
        drain_requests: 2,
        request_timeout_s: 1,
    };
    let collector = StreamCollector::new(collector_config);
    collector.drain(&mut icg, &mut ecg).await?;
    let (records_a, records_b) = collector.collect(&mut icg, &mut ecg).await?;

    tracing::info!(
        records_a = records_a.len(),
        records_b = records_b.len(),
        "collection complete"
    );

    // ==== Stage 3: Decode and analyze ====
    let packets_a =
        StreamDecoder::new(StreamId::A, analyzer.stream_a.clone()).decode_batch(&records_a);
    let packets_b =
        StreamDecoder::new(StreamId::B, analyzer.stream_b.clone()).decode_batch(&records_b);

    let engine = DriftEngine::new(analyzer);
    let report = engine.analyze(&packets_a, &packets_b)?;

    // ==== Stage 4: Print the result ====
    println!(
        "markers: icg={} ecg={} common={}",
        report.tally.stream_a, report.tally.stream_b, report.tally.common
    );
    if let Some(stats) = &report.statistics {
        println!(
            "drift: mean={:.3}ms max={:.3}ms rate={:?} ms/h",
            stats.mean_drift_ms, stats.max_drift_ms, stats.drift_rate_ms_per_hour
        );
    }
    println!("report: {}", serde_json::to_string_pretty(&report)?);
    println!(
        "verdict: {}",
        if report.success { "PASS" } else { "FAIL" }
    );

    Ok(())
}
