//! LogReportSink - logs the report summary via tracing

use contracts::{ContractError, DriftReport, ReportSink};
use tracing::{info, instrument, warn};

/// Sink that logs a report summary for quick inspection
pub struct LogReportSink {
    name: String,
}

impl LogReportSink {
    /// Create a new LogReportSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_report_summary(&self, report: &DriftReport) {
        info!(
            sink = %self.name,
            success = report.success,
            markers_a = report.tally.stream_a,
            markers_b = report.tally.stream_b,
            common = report.tally.common,
            threshold_ms = report.sync_threshold_ms,
            "DriftReport received"
        );

        match &report.statistics {
            Some(stats) => info!(
                sink = %self.name,
                mean_ms = stats.mean_drift_ms,
                median_ms = stats.median_drift_ms,
                std_ms = stats.std_drift_ms,
                min_ms = stats.min_drift_ms,
                max_ms = stats.max_drift_ms,
                rate_ms_per_hour = ?stats.drift_rate_ms_per_hour,
                "drift statistics"
            ),
            None => warn!(sink = %self.name, "no common sync markers between streams"),
        }
    }
}

impl ReportSink for LogReportSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, report),
        fields(sink = %self.name)
    )]
    async fn write(&mut self, report: &DriftReport) -> Result<(), ContractError> {
        self.log_report_summary(report);
        Ok(())
    }

    #[instrument(name = "log_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        // Nothing to flush for log sink
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        info!(sink = %self.name, "LogReportSink closed");
        Ok(())
    }
}
