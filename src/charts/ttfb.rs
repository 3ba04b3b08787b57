use plotters::prelude::*;

use crate::error::AppResult;
use crate::metrics::StatsSnapshot;

/// Scatter of per-request TTFB over elapsed time, with a mean reference
/// line.
///
/// # Errors
///
/// Returns an error if the chart cannot be drawn or written.
pub fn plot_ttfb(snapshot: &StatsSnapshot, path: &str) -> AppResult<()> {
    if snapshot.ttfb.is_empty() {
        return Ok(());
    }

    let x_max = snapshot.timestamp.iter().copied().fold(0.0_f64, f64::max);
    let y_max = snapshot.ttfb.iter().copied().fold(0.0_f64, f64::max);
    let x_limit = (x_max * 1.05).max(0.1);
    let y_limit = (y_max * 1.05).max(0.001);

    let root = BitMapBackend::new(path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("TTFB per Request", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_limit, 0.0..y_limit)?;

    chart
        .configure_mesh()
        .x_desc("Elapsed Time (seconds)")
        .y_desc("TTFB (seconds)")
        .draw()?;

    chart.draw_series(
        snapshot
            .timestamp
            .iter()
            .zip(snapshot.ttfb.iter())
            .map(|(x, y)| Circle::new((*x, *y), 3, BLUE.filled())),
    )?;

    let count = snapshot.ttfb.len() as f64;
    let mean = snapshot.ttfb.iter().sum::<f64>() / count;
    chart.draw_series(LineSeries::new([(0.0, mean), (x_limit, mean)], &RED))?;

    root.present()?;
    Ok(())
}
