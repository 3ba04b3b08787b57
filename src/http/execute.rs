use std::time::Instant;

use futures_util::StreamExt;
use reqwest::{Client, Request};

use crate::{
    error::{AppError, AppResult, HttpError},
    metrics::Sample,
};

/// Send one clone of the request template and time it.
///
/// TTFB is taken when the response headers arrive. Unless `ttfb_only` is
/// set the body is drained afterwards and its size recorded; the sample
/// timestamp is always taken at completion, relative to `run_start`.
///
/// # Errors
///
/// Returns an error if the template cannot be cloned, the request fails in
/// transport, or the body cannot be read. Any such error aborts the run.
pub async fn execute_request(
    client: &Client,
    template: &Request,
    run_start: Instant,
    ttfb_only: bool,
) -> AppResult<Sample> {
    let request = template
        .try_clone()
        .ok_or_else(|| AppError::http(HttpError::CloneRequestFailed))?;

    let started = Instant::now();
    let response = client
        .execute(request)
        .await
        .map_err(|err| AppError::http(HttpError::Transport { source: err }))?;
    let ttfb = started.elapsed();
    let status = response.status().as_u16();

    let response_size = if ttfb_only {
        None
    } else {
        let bytes = drain_response_body(response)
            .await
            .map_err(|err| AppError::http(HttpError::ReadBody { source: err }))?;
        Some(bytes)
    };

    Ok(Sample {
        ttfb,
        status,
        elapsed: run_start.elapsed(),
        response_size,
    })
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
