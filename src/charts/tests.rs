use std::collections::BTreeMap;
use std::future::Future;

use clap::Parser;
use tempfile::tempdir;

use super::{
    chart_run_dir_name, plot_responses_per_second, plot_ttfb, render_charts, target_segment,
};
use crate::args::VolleyArgs;
use crate::error::{AppError, AppResult};
use crate::metrics::StatsSnapshot;

fn sample_snapshot() -> StatsSnapshot {
    StatsSnapshot {
        ttfb: vec![0.10, 0.12, 0.11, 0.15, 0.09, 0.13],
        status: vec![200; 6],
        timestamp: vec![0.10, 0.12, 1.15, 1.16, 2.20, 2.25],
        response_size: None,
        total_duration: 2.3,
        responses_per_second: BTreeMap::from([(0, 2), (1, 2), (2, 2)]),
    }
}

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

#[test]
fn ttfb_chart_renders_a_png() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("ttfb.png");
    let path_str = match path.to_str() {
        Some(value) => value,
        None => return Err(AppError::metrics("failed to convert path to string")),
    };

    plot_ttfb(&sample_snapshot(), path_str)?;

    if std::fs::metadata(&path)?.len() > 0 {
        Ok(())
    } else {
        Err(AppError::metrics("chart file should not be empty"))
    }
}

#[test]
fn rps_chart_renders_a_png() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("rps.png");
    let path_str = match path.to_str() {
        Some(value) => value,
        None => return Err(AppError::metrics("failed to convert path to string")),
    };

    plot_responses_per_second(&sample_snapshot(), path_str)?;

    if std::fs::metadata(&path)?.len() > 0 {
        Ok(())
    } else {
        Err(AppError::metrics("chart file should not be empty"))
    }
}

#[test]
fn run_directory_name_carries_the_target() -> AppResult<()> {
    let args = VolleyArgs::try_parse_from(["volley", "--url", "http://127.0.0.1:8080/load"])
        .map_err(AppError::from)?;

    let name = chart_run_dir_name(&args);

    let checks = [
        (name.starts_with("run-"), "name should keep the run prefix"),
        (
            name.ends_with("_127.0.0.1-8080"),
            "name should end with host and port",
        ),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(AppError::metrics(message));
        }
    }
    Ok(())
}

#[test]
fn target_segment_sanitizes_and_falls_back() -> AppResult<()> {
    let checks = [
        (
            target_segment(Some("https://example.com/health")) == "example.com-443",
            "https should resolve the default port",
        ),
        (
            target_segment(Some("http://[::1]:9000/")) == "---1--9000",
            "non-filename characters should be replaced",
        ),
        (
            target_segment(None) == "unknown-host-0",
            "a missing url should fall back",
        ),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(AppError::metrics(message));
        }
    }
    Ok(())
}

#[test]
fn render_charts_honors_no_charts() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let charts_path = dir.path().join("charts");
        let charts_path_str = match charts_path.to_str() {
            Some(value) => value,
            None => return Err(AppError::metrics("failed to convert path to string")),
        };
        let args = VolleyArgs::try_parse_from([
            "volley",
            "--url",
            "http://localhost",
            "--charts-path",
            charts_path_str,
            "--no-charts",
        ])
        .map_err(AppError::from)?;

        let rendered = render_charts(&sample_snapshot(), &args).await?;

        let checks = [
            (rendered.is_none(), "no directory should be reported"),
            (!charts_path.exists(), "no directory should be created"),
        ];
        for (ok, message) in checks {
            if !ok {
                return Err(AppError::metrics(message));
            }
        }
        Ok(())
    })
}

#[test]
fn render_charts_writes_a_run_directory() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let charts_path = dir.path().join("charts");
        let charts_path_str = match charts_path.to_str() {
            Some(value) => value,
            None => return Err(AppError::metrics("failed to convert path to string")),
        };
        let args = VolleyArgs::try_parse_from([
            "volley",
            "--url",
            "http://localhost",
            "--charts-path",
            charts_path_str,
        ])
        .map_err(AppError::from)?;

        let rendered = render_charts(&sample_snapshot(), &args)
            .await?
            .ok_or_else(|| AppError::metrics("a run directory should be reported"))?;

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&rendered)? {
            names.push(entry?.file_name().to_string_lossy().to_string());
        }

        let checks = [
            (
                names.iter().any(|name| name == "ttfb.png"),
                "ttfb chart should exist",
            ),
            (
                names.iter().any(|name| name == "responses_per_second.png"),
                "rps chart should exist",
            ),
        ];
        for (ok, message) in checks {
            if !ok {
                return Err(AppError::metrics(message));
            }
        }
        Ok(())
    })
}
