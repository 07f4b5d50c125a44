//! DriftReport - Drift engine output
//!
//! One record per matched marker plus the aggregate statistics. Field names
//! and units (milliseconds for time differences, seconds for elapsed time,
//! integer counts) are stable across runs; downstream tooling depends on
//! them.

use serde::{Deserialize, Serialize};

use crate::StreamId;

/// One matched marker pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftRecord {
    /// Shared marker sequence number
    pub sequence: i64,

    /// Reconstructed time of the marker in stream A (epoch seconds)
    pub time_a: f64,

    /// Reconstructed time of the marker in stream B (epoch seconds)
    pub time_b: f64,

    /// `|time_a - time_b|` in milliseconds
    pub time_diff_ms: f64,

    /// Seconds since the first common marker (stream-A clock)
    pub elapsed_s: f64,

    /// Measurement samples between this marker and the next, stream A.
    /// Absent for the last marker of the stream.
    pub samples_between_a: Option<u64>,

    /// Measurement samples between this marker and the next, stream B
    pub samples_between_b: Option<u64>,
}

/// Aggregate drift statistics over all matched pairs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftStatistics {
    pub mean_drift_ms: f64,
    pub median_drift_ms: f64,
    /// Population standard deviation
    pub std_drift_ms: f64,
    pub min_drift_ms: f64,
    pub max_drift_ms: f64,

    /// Least-squares trend of `time_diff_ms` over elapsed time, scaled to
    /// ms/hour. `None` when the regression is undefined (fewer than two
    /// points, or zero variance in elapsed time).
    pub drift_rate_ms_per_hour: Option<f64>,
}

/// Sampling-rate fidelity of one stream, judged from inter-marker counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateFidelity {
    pub stream: StreamId,

    /// Mean of the inter-marker sample counts
    pub mean_samples: f64,

    /// Population standard deviation of the counts
    pub std_samples: f64,

    /// Configured expected count per interval
    pub expected_samples: u64,

    /// `|mean - expected| / expected * 100`
    pub deviation_pct: f64,
}

/// Per-stream and common marker totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerTally {
    /// Markers extracted from stream A
    pub stream_a: usize,

    /// Markers extracted from stream B
    pub stream_b: usize,

    /// Sequence numbers present in both streams
    pub common: usize,
}

/// Full drift analysis result
///
/// `statistics` and the fidelity blocks are absent when the streams share no
/// marker: that outcome is expected (streams never started, one stream
/// produced no markers) and is reported through `success = false` plus the
/// tally, never through an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
    /// `max(time_diff_ms) < sync_threshold_ms`, false when no common markers
    pub success: bool,

    /// Threshold the run was judged against (milliseconds)
    pub sync_threshold_ms: f64,

    /// Marker totals, populated even on failure
    pub tally: MarkerTally,

    /// One record per common sequence number, ordered by sequence
    pub records: Vec<DriftRecord>,

    /// Aggregate statistics; `None` without common markers
    pub statistics: Option<DriftStatistics>,

    /// Stream-A sampling fidelity; `None` without common markers
    pub fidelity_a: Option<RateFidelity>,

    /// Stream-B sampling fidelity
    pub fidelity_b: Option<RateFidelity>,
}

impl DriftReport {
    /// Build the explicit empty-result report for disjoint marker sets.
    pub fn no_common_markers(sync_threshold_ms: f64, stream_a: usize, stream_b: usize) -> Self {
        Self {
            success: false,
            sync_threshold_ms,
            tally: MarkerTally {
                stream_a,
                stream_b,
                common: 0,
            },
            records: Vec::new(),
            statistics: None,
            fidelity_a: None,
            fidelity_b: None,
        }
    }

    /// Whether any marker pair was matched
    #[inline]
    pub fn has_common_markers(&self) -> bool {
        self.tally.common > 0
    }
}
