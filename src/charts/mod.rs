//! PNG chart rendering for run snapshots.

mod rps;
mod ttfb;

#[cfg(test)]
mod tests;

use std::path::Path;

use chrono::{Datelike, Local, Timelike};
use tokio::fs;
use tracing::{error, info};
use url::Url;

use crate::args::VolleyArgs;
use crate::error::AppResult;
use crate::metrics::StatsSnapshot;

pub use rps::plot_responses_per_second;
pub use ttfb::plot_ttfb;

/// Render every chart into a timestamped run directory under the charts
/// path. Returns the directory, or `None` when charts are disabled or the
/// snapshot is empty.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or a chart
/// fails to render.
pub async fn render_charts(
    snapshot: &StatsSnapshot,
    args: &VolleyArgs,
) -> AppResult<Option<String>> {
    if args.no_charts || snapshot.ttfb.is_empty() {
        return Ok(None);
    }

    let output_dir = Path::new(&args.charts_path).join(chart_run_dir_name(args));
    let path = output_dir.to_string_lossy().to_string();

    if let Err(e) = fs::create_dir_all(Path::new(&path)).await {
        error!("Failed to create output directory '{}': {}", path, e);
        return Err(e.into());
    }

    info!("Plotting TTFB per request...");

    plot_ttfb(snapshot, &format!("{}/ttfb.png", path))?;

    info!("Plotting responses per second...");

    plot_responses_per_second(snapshot, &format!("{}/responses_per_second.png", path))?;

    info!("Charts written to '{}'.", path);

    Ok(Some(path))
}

fn chart_run_dir_name(args: &VolleyArgs) -> String {
    let now = Local::now();
    format!(
        "run-{:04}-{:02}-{:02}_{:02}-{:02}-{:02}_{}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        target_segment(args.url.as_deref())
    )
}

fn target_segment(url: Option<&str>) -> String {
    let Some(parsed) = url.and_then(|value| Url::parse(value).ok()) else {
        return "unknown-host-0".to_owned();
    };
    let host: String = parsed
        .host_str()
        .unwrap_or("unknown-host")
        .chars()
        .map(|ch| match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => ch,
            _ => '-',
        })
        .collect();
    let port = parsed.port_or_known_default().unwrap_or(0);
    format!("{}-{}", host, port)
}
