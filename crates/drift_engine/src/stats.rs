//! Closed-form descriptive statistics and least-squares regression.
//!
//! Everything the analyzer aggregates is computed here with plain arithmetic
//! over the full value slice; no numeric library involved.

/// Descriptive summary of a value slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation, `sqrt(mean((x - mean)^2))`
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize a slice of values. Returns `None` for an empty slice.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in values {
        min = min.min(value);
        max = max.max(value);
    }

    Some(Summary {
        count,
        mean,
        median: median(values),
        std_dev: variance.sqrt(),
        min,
        max,
    })
}

/// Ordinary least-squares slope of `y` over `x`.
///
/// Standard closed form `(nΣxy − ΣxΣy) / (nΣx² − (Σx)²)`. Returns `None`
/// with fewer than two points or a degenerate denominator (all x identical),
/// so a zero-variance abscissa reports as "undefined" instead of dividing by
/// zero.
pub fn least_squares_slope(points: &[(f64, f64)]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < 1e-12 {
        return None;
    }

    Some((n * sum_xy - sum_x * sum_y) / denominator)
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
