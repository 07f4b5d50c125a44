//! ReportDispatcher - fan-out of a finished report to sinks
//!
//! Reports are one-shot values, so there is no queueing: each configured
//! sink is built fresh, handed the report, and closed. A failing sink is
//! logged and does not stop the remaining sinks; the aggregate failure is
//! reported at the end.

use contracts::{DriftReport, ReportSink, RunBlueprint, SinkConfig, SinkType};
use tracing::{error, info, instrument};

use crate::error::DispatcherError;
use crate::sinks::{CsvReportSink, JsonReportSink, LogReportSink};

/// Dispatches a drift report to all configured sinks
pub struct ReportDispatcher {
    blueprint: RunBlueprint,
}

impl ReportDispatcher {
    /// Create a dispatcher for the given run configuration.
    ///
    /// The blueprint supplies both the sink list and the configuration that
    /// JSON sinks embed next to the report.
    pub fn new(blueprint: RunBlueprint) -> Self {
        Self { blueprint }
    }

    /// Write the report to every configured sink.
    ///
    /// # Errors
    /// `SinksFailed` listing the sinks that could not be created or written;
    /// the remaining sinks still receive the report.
    #[instrument(
        name = "dispatcher_dispatch",
        skip(self, report),
        fields(sinks = self.blueprint.sinks.len(), success = report.success)
    )]
    pub async fn dispatch(&self, report: &DriftReport) -> Result<(), DispatcherError> {
        let mut failed = Vec::new();

        for config in &self.blueprint.sinks {
            if let Err(e) = self.dispatch_to(config, report).await {
                error!(sink = %config.name, error = %e, "sink failed");
                failed.push(config.name.clone());
            }
        }

        info!(
            sinks = self.blueprint.sinks.len(),
            failed = failed.len(),
            "report dispatched"
        );

        if failed.is_empty() {
            Ok(())
        } else {
            Err(DispatcherError::SinksFailed { failed })
        }
    }

    async fn dispatch_to(
        &self,
        config: &SinkConfig,
        report: &DriftReport,
    ) -> Result<(), DispatcherError> {
        match config.sink_type {
            SinkType::Log => {
                let sink = LogReportSink::new(&config.name);
                Self::run_sink(sink, report).await
            }
            SinkType::Csv => {
                let sink = CsvReportSink::from_params(&config.name, &config.params)
                    .map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string()))?;
                Self::run_sink(sink, report).await
            }
            SinkType::Json => {
                let sink = JsonReportSink::from_params(
                    &config.name,
                    &config.params,
                    self.blueprint.clone(),
                )
                .map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string()))?;
                Self::run_sink(sink, report).await
            }
        }
    }

    async fn run_sink<S: ReportSink>(
        mut sink: S,
        report: &DriftReport,
    ) -> Result<(), DispatcherError> {
        sink.write(report).await?;
        sink.flush().await?;
        sink.close().await?;
        Ok(())
    }
}
