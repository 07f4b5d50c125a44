//! Main drift engine implementation.

use contracts::{AnalyzerConfig, ContractError, DriftReport, MarkerTally, Packet, StreamId};
use tracing::{debug, instrument, warn};

use crate::analyzer::{build_report, AnalysisContext};
use crate::counter::count_samples_between;
use crate::extractor::extract_markers;
use crate::matcher::match_markers;

/// Two-stream drift analysis engine
///
/// Holds the run configuration and nothing else: `analyze` is a pure
/// function of its inputs and can be re-invoked on a growing prefix of the
/// packet lists at any time.
#[derive(Debug, Clone)]
pub struct DriftEngine {
    /// Configuration
    config: AnalyzerConfig,
}

impl DriftEngine {
    /// Create a new drift engine with the given configuration
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze two decoded packet streams and produce a `DriftReport`.
    ///
    /// Packets must be supplied in strict acquisition order per stream.
    /// An empty sequence intersection yields an unsuccessful report with
    /// diagnostic counts, not an error.
    ///
    /// # Errors
    /// `NonMonotonicSequence` when either stream's marker sequence numbers
    /// fail to increase in emission order.
    #[instrument(
        name = "drift_engine_analyze",
        skip(self, packets_a, packets_b),
        fields(packets_a = packets_a.len(), packets_b = packets_b.len())
    )]
    pub fn analyze(
        &self,
        packets_a: &[Packet],
        packets_b: &[Packet],
    ) -> Result<DriftReport, ContractError> {
        let markers_a = extract_markers(
            StreamId::A,
            packets_a,
            self.config.stream_a.sampling_rate_hz,
        )?;
        let markers_b = extract_markers(
            StreamId::B,
            packets_b,
            self.config.stream_b.sampling_rate_hz,
        )?;

        debug!(
            markers_a = markers_a.len(),
            markers_b = markers_b.len(),
            "markers extracted"
        );

        let pairs = match_markers(&markers_a, &markers_b);
        if pairs.is_empty() {
            warn!(
                markers_a = markers_a.len(),
                markers_b = markers_b.len(),
                "no common sync markers between streams"
            );
            metrics::counter!("drift_analyses_total", "status" => "no_common_markers")
                .increment(1);
            return Ok(DriftReport::no_common_markers(
                self.config.sync_threshold_ms,
                markers_a.len(),
                markers_b.len(),
            ));
        }

        let counts_a = count_samples_between(packets_a, &markers_a);
        let counts_b = count_samples_between(packets_b, &markers_b);

        let tally = MarkerTally {
            stream_a: markers_a.len(),
            stream_b: markers_b.len(),
            common: pairs.len(),
        };

        let report = build_report(
            &pairs,
            &AnalysisContext {
                counts_a: &counts_a,
                counts_b: &counts_b,
                expected_samples_a: self.config.expected_samples_for(&self.config.stream_a),
                expected_samples_b: self.config.expected_samples_for(&self.config.stream_b),
                sync_threshold_ms: self.config.sync_threshold_ms,
                tally,
            },
        );

        self.record_metrics(&report);
        Ok(report)
    }

    fn record_metrics(&self, report: &DriftReport) {
        let status = if report.success { "ok" } else { "failed" };
        metrics::counter!("drift_analyses_total", "status" => status.to_string()).increment(1);
        metrics::gauge!("drift_common_markers").set(report.tally.common as f64);

        if let Some(stats) = &report.statistics {
            metrics::histogram!("drift_max_time_diff_ms").record(stats.max_drift_ms);
            metrics::histogram!("drift_mean_time_diff_ms").record(stats.mean_drift_ms);
        }
    }
}
