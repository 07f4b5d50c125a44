//! Human-readable run summaries printed to stdout.

use contracts::{CapturedRecord, DriftReport, RateFidelity};
use observability::{RunningStats, StatsSummary};

/// Sample-count deviation beyond which fidelity is flagged
const FIDELITY_WARN_PCT: f64 = 5.0;

/// Print the collection overview: how much data each stream delivered.
pub fn print_collection_overview(
    label_a: &str,
    label_b: &str,
    records_a: &[CapturedRecord],
    records_b: &[CapturedRecord],
) {
    println!("\n=== Collection Overview ===");
    print_stream_overview(label_a, records_a);
    print_stream_overview(label_b, records_b);
}

fn print_stream_overview(label: &str, records: &[CapturedRecord]) {
    let mut samples_per_record = RunningStats::default();
    for record in records {
        samples_per_record.push(record.record.data.len() as f64);
    }

    println!(
        "{}: {} records, samples/record: {}",
        label,
        records.len(),
        StatsSummary::from(&samples_per_record)
    );
}

/// Print the drift analysis summary, mirroring the report's pass/fail logic.
pub fn print_report_summary(report: &DriftReport, label_a: &str, label_b: &str) {
    println!("\n=== Drift Analysis Summary ===");
    println!(
        "Sync markers: {}={}, {}={}, common={}",
        label_a, report.tally.stream_a, label_b, report.tally.stream_b, report.tally.common
    );

    let Some(stats) = &report.statistics else {
        println!("FAIL: no common sync markers between streams");
        return;
    };

    println!("\nDrift statistics:");
    println!("  Mean drift:   {:.3} ms", stats.mean_drift_ms);
    println!("  Median drift: {:.3} ms", stats.median_drift_ms);
    println!("  Std dev:      {:.3} ms", stats.std_drift_ms);
    println!("  Min drift:    {:.3} ms", stats.min_drift_ms);
    println!("  Max drift:    {:.3} ms", stats.max_drift_ms);
    match stats.drift_rate_ms_per_hour {
        Some(rate) => println!("  Drift rate:   {:.3} ms/hour", rate),
        None => println!("  Drift rate:   undefined"),
    }

    println!("\nSample count validation:");
    print_fidelity(label_a, report.fidelity_a.as_ref());
    print_fidelity(label_b, report.fidelity_b.as_ref());

    if report.success {
        println!(
            "\nPASS: all drift values within threshold ({} ms)",
            report.sync_threshold_ms
        );
    } else {
        println!(
            "\nFAIL: max drift {:.3} ms exceeds threshold ({} ms)",
            stats.max_drift_ms, report.sync_threshold_ms
        );
    }
}

fn print_fidelity(label: &str, fidelity: Option<&RateFidelity>) {
    match fidelity {
        Some(f) => {
            let verdict = if f.deviation_pct > FIDELITY_WARN_PCT {
                "WARN"
            } else {
                "ok"
            };
            println!(
                "  {}: {:.1} samples (±{:.1}), expected {}, deviation {:.1}% [{}]",
                label, f.mean_samples, f.std_samples, f.expected_samples, f.deviation_pct, verdict
            );
        }
        None => println!("  {}: no intervals measured", label),
    }
}
