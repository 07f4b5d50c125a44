//! Drift analysis metrics
//!
//! Prometheus recording helpers plus a small online-statistics calculator
//! for run summaries.

use contracts::DriftReport;
use metrics::{counter, gauge};

/// Record a finished drift report to the Prometheus registry.
///
/// Called once per analysis pass.
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_drift_report;
///
/// let report = engine.analyze(&packets_a, &packets_b)?;
/// record_drift_report(&report);
/// ```
pub fn record_drift_report(report: &DriftReport) {
    let status = if report.success { "pass" } else { "fail" };
    counter!("drift_reports_total", "status" => status.to_string()).increment(1);

    gauge!("drift_markers_stream_a").set(report.tally.stream_a as f64);
    gauge!("drift_markers_stream_b").set(report.tally.stream_b as f64);
    gauge!("drift_markers_common").set(report.tally.common as f64);
    gauge!("drift_sync_threshold_ms").set(report.sync_threshold_ms);

    if let Some(stats) = &report.statistics {
        gauge!("drift_mean_ms").set(stats.mean_drift_ms);
        gauge!("drift_max_ms").set(stats.max_drift_ms);
        gauge!("drift_std_ms").set(stats.std_drift_ms);
        if let Some(rate) = stats.drift_rate_ms_per_hour {
            gauge!("drift_rate_ms_per_hour").set(rate);
        }
    }

    for fidelity in [&report.fidelity_a, &report.fidelity_b].into_iter().flatten() {
        gauge!(
            "drift_samples_between_mean",
            "stream" => fidelity.stream.to_string()
        )
        .set(fidelity.mean_samples);
        gauge!(
            "drift_samples_deviation_pct",
            "stream" => fidelity.stream.to_string()
        )
        .set(fidelity.deviation_pct);
    }
}

/// Online statistics calculator (Welford's algorithm)
///
/// Used for run summaries over values that are only seen once, like
/// per-record sample counts during collection.
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// Number of values seen
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Sample standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Minimum
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum
    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Statistics summary snapshot
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}
