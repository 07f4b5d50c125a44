//! RunBlueprint - full per-run configuration
//!
//! Every constant the analysis depends on (thresholds, sampling rates,
//! marker encodings, polling cadence, sinks) is collected here and passed in
//! explicitly; nothing is read from ambient state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunBlueprint {
    /// Analysis parameters
    pub analyzer: AnalyzerConfig,

    /// Transport parameters
    pub collector: CollectorConfig,

    /// Report sinks
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// Drift analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Pass/fail threshold on the maximum time difference (milliseconds)
    pub sync_threshold_ms: f64,

    /// Nominal marker emission interval (seconds)
    #[serde(default = "default_nominal_interval_s")]
    pub nominal_interval_s: f64,

    /// Expected measurement samples between consecutive markers. When unset,
    /// derived per stream as `sampling_rate_hz * nominal_interval_s`.
    #[serde(default)]
    pub expected_samples_per_interval: Option<u64>,

    /// Stream A settings
    pub stream_a: StreamConfig,

    /// Stream B settings
    pub stream_b: StreamConfig,
}

fn default_nominal_interval_s() -> f64 {
    1.0
}

impl AnalyzerConfig {
    /// Expected inter-marker sample count for the given stream settings.
    ///
    /// An explicitly configured count wins; otherwise the count scales with
    /// the sampling rate actually configured for the stream.
    pub fn expected_samples_for(&self, stream: &StreamConfig) -> u64 {
        self.expected_samples_per_interval
            .unwrap_or_else(|| (stream.sampling_rate_hz * self.nominal_interval_s).round() as u64)
    }
}

impl Default for AnalyzerConfig {
    /// Reference setup: ICG (MAX30009-style scaled markers) against ECG
    /// (ADS1293-style direct markers), both at 400 Hz, 50 ms threshold.
    fn default() -> Self {
        Self {
            sync_threshold_ms: 50.0,
            nominal_interval_s: 1.0,
            expected_samples_per_interval: None,
            stream_a: StreamConfig {
                label: "icg".to_string(),
                sampling_rate_hz: 400.0,
                magic_sentinel: -999_990_000,
                scale_factor: 10_000,
            },
            stream_b: StreamConfig {
                label: "ecg".to_string(),
                sampling_rate_hz: 400.0,
                magic_sentinel: -99_999,
                scale_factor: 1,
            },
        }
    }
}

/// Per-stream acquisition and marker-encoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Human-readable stream label (device name), used in logs and reports
    pub label: String,

    /// Sampling rate configured on the device for this run (Hz). Must be the
    /// rate actually in effect at acquisition time; it is never inferred.
    pub sampling_rate_hz: f64,

    /// Sentinel value in the first vector element that marks a sync marker
    pub magic_sentinel: i64,

    /// Divisor applied to the raw sequence field (1 = encoded directly)
    #[serde(default = "default_scale_factor")]
    pub scale_factor: i64,
}

fn default_scale_factor() -> i64 {
    1
}

/// Transport polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Host running both sensor services
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port of the stream-A service
    pub port_a: u16,

    /// TCP port of the stream-B service
    pub port_b: u16,

    /// Delay between data requests (seconds)
    #[serde(default = "default_poll_interval_s")]
    pub poll_interval_s: f64,

    /// Total collection duration (seconds)
    #[serde(default = "default_duration_s")]
    pub duration_s: u64,

    /// Throwaway requests issued per stream before collecting, to drain
    /// stale device buffers
    #[serde(default = "default_drain_requests")]
    pub drain_requests: u32,

    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout_s")]
    pub request_timeout_s: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_poll_interval_s() -> f64 {
    0.2
}

fn default_duration_s() -> u64 {
    30
}

fn default_drain_requests() -> u32 {
    5
}

fn default_request_timeout_s() -> u64 {
    10
}

/// Sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name
    pub name: String,

    /// Sink type
    pub sink_type: SinkType,

    /// Type-specific parameters (e.g. `path`)
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Per-record CSV file
    Csv,
    /// Full report + configuration JSON document
    Json,
    /// Tracing summary
    Log,
}
