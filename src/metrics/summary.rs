use serde::Serialize;

use super::StatsSnapshot;
use crate::error::MetricsError;

/// Success means this exact status, not the whole 2xx class.
const SUCCESS_STATUS: u16 = 200;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// Wall-clock seconds from first batch start to last batch completion.
    pub total_duration: f64,
    /// Achieved throughput: outcome count over total duration.
    pub responses_per_second: f64,
    pub avg_ttfb: f64,
    pub median_ttfb: f64,
    pub min_ttfb: f64,
    pub max_ttfb: f64,
    pub p90_ttfb: f64,
    pub p95_ttfb: f64,
    pub p99_ttfb: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_sizes: Option<SizeSummary>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SizeSummary {
    pub total_bytes: u64,
    pub avg_bytes: f64,
    pub min_bytes: u64,
    pub max_bytes: u64,
}

/// Reduces a snapshot to the reported aggregate figures.
///
/// # Errors
///
/// Returns [`MetricsError::EmptySeries`] when the snapshot holds no samples.
pub fn summarize(snapshot: &StatsSnapshot) -> Result<RunSummary, MetricsError> {
    if snapshot.ttfb.is_empty() {
        return Err(MetricsError::EmptySeries);
    }

    let mut sorted = snapshot.ttfb.clone();
    sorted.sort_by(f64::total_cmp);

    let total = snapshot.ttfb.len();
    let success = snapshot
        .status
        .iter()
        .filter(|&&status| status == SUCCESS_STATUS)
        .count();
    let failed = total.saturating_sub(success);

    let sum: f64 = sorted.iter().sum();
    let avg = sum / total as f64;
    let min = sorted.first().copied().unwrap_or(0.0);
    let max = sorted.last().copied().unwrap_or(0.0);

    let responses_per_second = if snapshot.total_duration > 0.0 {
        total as f64 / snapshot.total_duration
    } else {
        0.0
    };

    Ok(RunSummary {
        total_requests: total as u64,
        successful_requests: success as u64,
        failed_requests: failed as u64,
        total_duration: snapshot.total_duration,
        responses_per_second,
        avg_ttfb: avg,
        median_ttfb: percentile(&sorted, 50.0),
        min_ttfb: min,
        max_ttfb: max,
        p90_ttfb: percentile(&sorted, 90.0),
        p95_ttfb: percentile(&sorted, 95.0),
        p99_ttfb: percentile(&sorted, 99.0),
        response_sizes: summarize_sizes(snapshot.response_size.as_deref()),
    })
}

fn summarize_sizes(sizes: Option<&[u64]>) -> Option<SizeSummary> {
    let sizes = sizes?;
    if sizes.is_empty() {
        return None;
    }
    let total_bytes = sizes
        .iter()
        .fold(0u64, |acc, &size| acc.saturating_add(size));
    let min_bytes = sizes.iter().copied().min().unwrap_or(0);
    let max_bytes = sizes.iter().copied().max().unwrap_or(0);
    let avg_bytes = total_bytes as f64 / sizes.len() as f64;

    Some(SizeSummary {
        total_bytes,
        avg_bytes,
        min_bytes,
        max_bytes,
    })
}

/// Percentile over a sorted series with linear interpolation between the two
/// bracketing ranks: rank = pct/100 * (n-1).
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let count = sorted.len().saturating_sub(1);
    if count == 0 {
        return sorted.first().copied().unwrap_or(0.0);
    }
    let rank = pct / 100.0 * count as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = rank.ceil() as usize;
    let lower = sorted.get(lower_idx).copied().unwrap_or(0.0);
    let upper = sorted.get(upper_idx).copied().unwrap_or(lower);
    let weight = rank - rank.floor();
    lower + (upper - lower) * weight
}
