//! Run reports printed to stdout, as plain text or JSON.

use chrono::{DateTime, Utc};

use crate::{
    args::OutputFormat,
    error::AppResult,
    metrics::{RunSummary, StatsSnapshot},
};


/// Print the run report in the selected format.
///
/// # Errors
///
/// Returns an error if the JSON report cannot be serialized.
pub fn print_report(
    format: OutputFormat,
    started_at: DateTime<Utc>,
    summary: &RunSummary,
    snapshot: &StatsSnapshot,
) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            for line in summary_lines(summary) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", json_report(started_at, summary, snapshot)?);
        }
    }
    Ok(())
}

fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Total Duration: {:.2}s", summary.total_duration),
        format!("Total Requests: {}", summary.total_requests),
        format!("Total Success: {}", summary.successful_requests),
        format!("Total Failures: {}", summary.failed_requests),
        format!("Requests per Second: {:.2}", summary.responses_per_second),
        format!("Avg TTFB: {:.3}s", summary.avg_ttfb),
        format!("Max TTFB: {:.3}s", summary.max_ttfb),
        format!("Min TTFB: {:.3}s", summary.min_ttfb),
        format!("Median TTFB: {:.3}s", summary.median_ttfb),
        format!("90th Percentile TTFB: {:.3}s", summary.p90_ttfb),
        format!("95th Percentile TTFB: {:.3}s", summary.p95_ttfb),
        format!("99th Percentile TTFB: {:.3}s", summary.p99_ttfb),
    ];

    if let Some(sizes) = summary.response_sizes.as_ref() {
        lines.push(format!("Total Response Bytes: {}", sizes.total_bytes));
        lines.push(format!("Avg Response Size: {:.1} bytes", sizes.avg_bytes));
        lines.push(format!(
            "Min/Max Response Size: {} / {} bytes",
            sizes.min_bytes, sizes.max_bytes
        ));
    }

    lines
}

fn json_report(
    started_at: DateTime<Utc>,
    summary: &RunSummary,
    snapshot: &StatsSnapshot,
) -> AppResult<String> {
    let payload = serde_json::json!({
        "started_at": started_at.to_rfc3339(),
        "summary": summary,
        "snapshot": snapshot,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}
