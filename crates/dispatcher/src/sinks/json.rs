//! JsonReportSink - full report document with the configuration used
//!
//! The JSON embeds the run configuration next to the report so a result file
//! is self-describing: downstream tooling never has to guess which rates or
//! thresholds produced it.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::Utc;
use contracts::{ContractError, DriftReport, ReportSink, RunBlueprint};
use serde::Serialize;
use tracing::{debug, error, instrument};

/// Sink that writes the full report as a JSON document
pub struct JsonReportSink {
    name: String,
    path: PathBuf,
    blueprint: RunBlueprint,
}

/// On-disk document shape
#[derive(Serialize)]
struct ReportDocument<'a> {
    report_name: &'static str,
    generated_at: String,
    configuration: &'a RunBlueprint,
    report: &'a DriftReport,
}

impl JsonReportSink {
    /// Create a new JsonReportSink writing to the given path
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        blueprint: RunBlueprint,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            blueprint,
        }
    }

    /// Create from params map (for the dispatcher factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
        blueprint: RunBlueprint,
    ) -> std::io::Result<Self> {
        let path = params
            .get("path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./drift_report.json"));
        Ok(Self::new(name, path, blueprint))
    }

    fn write_report_to_disk(&self, report: &DriftReport) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let document = ReportDocument {
            report_name: "sync-mark drift analysis",
            generated_at: Utc::now().to_rfc3339(),
            configuration: &self.blueprint,
            report,
        };

        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(writer, &document)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

impl ReportSink for JsonReportSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "json_sink_write",
        skip(self, report),
        fields(sink = %self.name, records = report.records.len())
    )]
    async fn write(&mut self, report: &DriftReport) -> Result<(), ContractError> {
        self.write_report_to_disk(report).map_err(|e| {
            error!(sink = %self.name, path = %self.path.display(), error = %e, "Write failed");
            ContractError::sink_write(&self.name, e.to_string())
        })?;
        debug!(sink = %self.name, path = %self.path.display(), "JSON report written");
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        debug!(sink = %self.name, "JsonReportSink closed");
        Ok(())
    }
}
