//! Drift record assembly and aggregate statistics.

use contracts::{
    DriftRecord, DriftReport, DriftStatistics, IntervalCounts, MarkerTally, RateFidelity, StreamId,
};

use crate::matcher::MatchedPair;
use crate::stats::{least_squares_slope, summarize};

/// Everything the analyzer needs besides the matched pairs
pub(crate) struct AnalysisContext<'a> {
    pub counts_a: &'a IntervalCounts,
    pub counts_b: &'a IntervalCounts,
    pub expected_samples_a: u64,
    pub expected_samples_b: u64,
    pub sync_threshold_ms: f64,
    pub tally: MarkerTally,
}

/// Build the full report from matched pairs.
///
/// `pairs` must be non-empty and sorted by sequence; the engine handles the
/// empty case separately.
pub(crate) fn build_report(pairs: &[MatchedPair], ctx: &AnalysisContext<'_>) -> DriftReport {
    let first_time_a = pairs[0].time_a;

    let records: Vec<DriftRecord> = pairs
        .iter()
        .map(|pair| DriftRecord {
            sequence: pair.sequence,
            time_a: pair.time_a,
            time_b: pair.time_b,
            time_diff_ms: (pair.time_a - pair.time_b).abs() * 1000.0,
            elapsed_s: pair.time_a - first_time_a,
            samples_between_a: ctx.counts_a.get(&pair.sequence).copied(),
            samples_between_b: ctx.counts_b.get(&pair.sequence).copied(),
        })
        .collect();

    let statistics = drift_statistics(&records);
    let success = statistics
        .map(|s| s.max_drift_ms < ctx.sync_threshold_ms)
        .unwrap_or(false);

    DriftReport {
        success,
        sync_threshold_ms: ctx.sync_threshold_ms,
        tally: ctx.tally,
        fidelity_a: rate_fidelity(
            StreamId::A,
            records.iter().filter_map(|r| r.samples_between_a),
            ctx.expected_samples_a,
        ),
        fidelity_b: rate_fidelity(
            StreamId::B,
            records.iter().filter_map(|r| r.samples_between_b),
            ctx.expected_samples_b,
        ),
        records,
        statistics,
    }
}

fn drift_statistics(records: &[DriftRecord]) -> Option<DriftStatistics> {
    let diffs: Vec<f64> = records.iter().map(|r| r.time_diff_ms).collect();
    let summary = summarize(&diffs)?;

    let points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (r.elapsed_s, r.time_diff_ms))
        .collect();
    let drift_rate_ms_per_hour = least_squares_slope(&points).map(|slope| slope * 3600.0);

    Some(DriftStatistics {
        mean_drift_ms: summary.mean,
        median_drift_ms: summary.median,
        std_drift_ms: summary.std_dev,
        min_drift_ms: summary.min,
        max_drift_ms: summary.max,
        drift_rate_ms_per_hour,
    })
}

fn rate_fidelity(
    stream: StreamId,
    counts: impl Iterator<Item = u64>,
    expected_samples: u64,
) -> Option<RateFidelity> {
    let values: Vec<f64> = counts.map(|c| c as f64).collect();
    let summary = summarize(&values)?;

    let deviation_pct = (summary.mean - expected_samples as f64).abs() / expected_samples as f64
        * 100.0;

    Some(RateFidelity {
        stream,
        mean_samples: summary.mean,
        std_samples: summary.std_dev,
        expected_samples,
        deviation_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn context<'a>(
        counts_a: &'a IntervalCounts,
        counts_b: &'a IntervalCounts,
        threshold_ms: f64,
    ) -> AnalysisContext<'a> {
        AnalysisContext {
            counts_a,
            counts_b,
            expected_samples_a: 400,
            expected_samples_b: 400,
            sync_threshold_ms: threshold_ms,
            tally: MarkerTally {
                stream_a: 3,
                stream_b: 3,
                common: 2,
            },
        }
    }

    #[test]
    fn test_records_and_elapsed_origin() {
        let pairs = vec![
            MatchedPair {
                sequence: 2,
                time_a: 11.0,
                time_b: 11.05,
            },
            MatchedPair {
                sequence: 3,
                time_a: 12.0,
                time_b: 12.05,
            },
        ];
        let counts_a = IntervalCounts::from([(2, 400u64)]);
        let counts_b = IntervalCounts::from([(2, 399u64)]);

        let report = build_report(&pairs, &context(&counts_a, &counts_b, 100.0));

        assert_eq!(report.records.len(), 2);
        assert!((report.records[0].time_diff_ms - 50.0).abs() < EPS);
        assert!((report.records[0].elapsed_s - 0.0).abs() < EPS);
        assert!((report.records[1].elapsed_s - 1.0).abs() < EPS);
        assert_eq!(report.records[0].samples_between_a, Some(400));
        assert_eq!(report.records[0].samples_between_b, Some(399));
        assert_eq!(report.records[1].samples_between_a, None);
    }

    #[test]
    fn test_success_against_threshold() {
        let pairs = vec![
            MatchedPair {
                sequence: 1,
                time_a: 0.0,
                time_b: 0.05,
            },
            MatchedPair {
                sequence: 2,
                time_a: 1.0,
                time_b: 1.05,
            },
        ];
        let empty = IntervalCounts::new();

        let passing = build_report(&pairs, &context(&empty, &empty, 51.0));
        assert!(passing.success);

        let failing = build_report(&pairs, &context(&empty, &empty, 50.0));
        assert!(!failing.success);
    }

    #[test]
    fn test_constant_offset_has_zero_trend() {
        let pairs: Vec<MatchedPair> = (0..10)
            .map(|i| MatchedPair {
                sequence: i,
                time_a: i as f64,
                time_b: i as f64 + 0.05,
            })
            .collect();
        let empty = IntervalCounts::new();

        let report = build_report(&pairs, &context(&empty, &empty, 100.0));
        let stats = report.statistics.unwrap();
        assert!((stats.mean_drift_ms - 50.0).abs() < EPS);
        assert!(stats.drift_rate_ms_per_hour.unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_growing_drift_trend() {
        // Drift grows by 1 ms per second of elapsed time -> 3600 ms/hour
        let pairs: Vec<MatchedPair> = (0..10)
            .map(|i| MatchedPair {
                sequence: i,
                time_a: i as f64,
                time_b: i as f64 + 0.001 * i as f64,
            })
            .collect();
        let empty = IntervalCounts::new();

        let report = build_report(&pairs, &context(&empty, &empty, 100.0));
        let rate = report.statistics.unwrap().drift_rate_ms_per_hour.unwrap();
        assert!((rate - 3600.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_pair_has_undefined_trend() {
        let pairs = vec![MatchedPair {
            sequence: 1,
            time_a: 0.0,
            time_b: 0.01,
        }];
        let empty = IntervalCounts::new();

        let report = build_report(&pairs, &context(&empty, &empty, 100.0));
        let stats = report.statistics.unwrap();
        assert!(stats.drift_rate_ms_per_hour.is_none());
        assert!((stats.median_drift_ms - 10.0).abs() < EPS);
    }

    #[test]
    fn test_fidelity_deviation_pct() {
        let pairs = vec![
            MatchedPair {
                sequence: 1,
                time_a: 0.0,
                time_b: 0.0,
            },
            MatchedPair {
                sequence: 2,
                time_a: 1.0,
                time_b: 1.0,
            },
        ];
        // Mean of 380 and 400 is 390: 2.5% below the expected 400
        let counts_a = IntervalCounts::from([(1, 380u64), (2, 400u64)]);
        let counts_b = IntervalCounts::new();

        let report = build_report(&pairs, &context(&counts_a, &counts_b, 100.0));
        let fidelity = report.fidelity_a.unwrap();
        assert!((fidelity.mean_samples - 390.0).abs() < EPS);
        assert!((fidelity.deviation_pct - 2.5).abs() < EPS);
        assert!(report.fidelity_b.is_none());
    }
}
