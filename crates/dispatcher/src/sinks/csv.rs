//! CsvReportSink - one row per drift record
//!
//! Column names and units are stable across runs: milliseconds for time
//! differences, seconds (and minutes) for elapsed time, integer sample
//! counts with signed deviations from the expected count.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use contracts::{ContractError, DriftReport, ReportSink};
use tracing::{debug, error, instrument};

const CSV_HEADER: &str = "sequence,time_a,time_b,time_diff_ms,elapsed_time_s,elapsed_time_min,\
                          samples_between_a,samples_between_b,sample_deviation_a,sample_deviation_b";

/// Sink that writes drift records to a CSV file
pub struct CsvReportSink {
    name: String,
    path: PathBuf,
}

impl CsvReportSink {
    /// Create a new CsvReportSink writing to the given path
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create from params map (for the dispatcher factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        let path = params
            .get("path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./drift_report.csv"));
        Ok(Self::new(name, path))
    }

    fn write_report_to_disk(&self, report: &DriftReport) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        writeln!(writer, "{CSV_HEADER}")?;

        let expected_a = report.fidelity_a.map(|f| f.expected_samples as i64);
        let expected_b = report.fidelity_b.map(|f| f.expected_samples as i64);

        for record in &report.records {
            writeln!(
                writer,
                "{},{:.6},{:.6},{:.3},{:.1},{:.2},{},{},{},{}",
                record.sequence,
                record.time_a,
                record.time_b,
                record.time_diff_ms,
                record.elapsed_s,
                record.elapsed_s / 60.0,
                optional_count(record.samples_between_a),
                optional_count(record.samples_between_b),
                optional_deviation(record.samples_between_a, expected_a),
                optional_deviation(record.samples_between_b, expected_b),
            )?;
        }

        writer.flush()
    }
}

fn optional_count(count: Option<u64>) -> String {
    count.map(|c| c.to_string()).unwrap_or_default()
}

fn optional_deviation(count: Option<u64>, expected: Option<i64>) -> String {
    match (count, expected) {
        (Some(count), Some(expected)) => format!("{:+}", count as i64 - expected),
        _ => String::new(),
    }
}

impl ReportSink for CsvReportSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "csv_sink_write",
        skip(self, report),
        fields(sink = %self.name, records = report.records.len())
    )]
    async fn write(&mut self, report: &DriftReport) -> Result<(), ContractError> {
        self.write_report_to_disk(report).map_err(|e| {
            error!(sink = %self.name, path = %self.path.display(), error = %e, "Write failed");
            ContractError::sink_write(&self.name, e.to_string())
        })?;
        debug!(sink = %self.name, path = %self.path.display(), "CSV report written");
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        debug!(sink = %self.name, "CsvReportSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{DriftRecord, MarkerTally, RateFidelity, StreamId};
    use tempfile::tempdir;

    fn sample_report() -> DriftReport {
        DriftReport {
            success: true,
            sync_threshold_ms: 50.0,
            tally: MarkerTally {
                stream_a: 2,
                stream_b: 2,
                common: 2,
            },
            records: vec![
                DriftRecord {
                    sequence: 1,
                    time_a: 10.0,
                    time_b: 10.005,
                    time_diff_ms: 5.0,
                    elapsed_s: 0.0,
                    samples_between_a: Some(398),
                    samples_between_b: Some(400),
                },
                DriftRecord {
                    sequence: 2,
                    time_a: 11.0,
                    time_b: 11.005,
                    time_diff_ms: 5.0,
                    elapsed_s: 1.0,
                    samples_between_a: None,
                    samples_between_b: None,
                },
            ],
            statistics: None,
            fidelity_a: Some(RateFidelity {
                stream: StreamId::A,
                mean_samples: 398.0,
                std_samples: 0.0,
                expected_samples: 400,
                deviation_pct: 0.5,
            }),
            fidelity_b: Some(RateFidelity {
                stream: StreamId::B,
                mean_samples: 400.0,
                std_samples: 0.0,
                expected_samples: 400,
                deviation_pct: 0.0,
            }),
        }
    }

    #[tokio::test]
    async fn test_csv_sink_writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");

        let mut sink = CsvReportSink::new("test_csv", &path);
        sink.write(&sample_report()).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("sequence,time_a,time_b,time_diff_ms"));
        assert!(lines[1].starts_with("1,10.000000,10.005000,5.000,0.0,0.00,398,400,-2,+0"));
        // Missing counts leave empty cells
        assert!(lines[2].ends_with(",,,,"));
    }

    #[tokio::test]
    async fn test_csv_sink_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/report.csv");

        let mut sink = CsvReportSink::new("test_csv", &path);
        sink.write(&sample_report()).await.unwrap();

        assert!(path.exists());
    }
}
