use plotters::prelude::*;

use crate::error::AppResult;
use crate::metrics::StatsSnapshot;

/// Per-second response counts over elapsed time, zero-filled for seconds
/// with no completions.
///
/// # Errors
///
/// Returns an error if the chart cannot be drawn or written.
pub fn plot_responses_per_second(snapshot: &StatsSnapshot, path: &str) -> AppResult<()> {
    if snapshot.responses_per_second.is_empty() {
        return Ok(());
    }

    let max_sec = snapshot
        .responses_per_second
        .keys()
        .next_back()
        .copied()
        .unwrap_or(0);
    let max_count = snapshot
        .responses_per_second
        .values()
        .max()
        .copied()
        .unwrap_or(1);

    let max_sec_u32 = u32::try_from(max_sec).unwrap_or(u32::MAX);
    let max_count_u32 = u32::try_from(max_count).unwrap_or(u32::MAX);
    let x_range = 0u32..max_sec_u32.saturating_add(1);
    let y_range = 0u32..max_count_u32.saturating_add(1);

    let root = BitMapBackend::new(path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Responses per Second", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Elapsed Time (seconds)")
        .y_desc("Responses per Second")
        .draw()?;

    chart.draw_series(LineSeries::new(
        (0..=max_sec).map(|sec| {
            let count = snapshot
                .responses_per_second
                .get(&sec)
                .copied()
                .unwrap_or(0);
            (
                u32::try_from(sec).unwrap_or(u32::MAX),
                u32::try_from(count).unwrap_or(u32::MAX),
            )
        }),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}
