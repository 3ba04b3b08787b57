use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

/// One measured request outcome, sent to the collector as it completes.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Interval between request submission and arrival of response headers.
    pub ttfb: Duration,
    pub status: u16,
    /// Elapsed time since the start of the run, including body transfer.
    pub elapsed: Duration,
    /// Body size in bytes; `None` when only the TTFB was measured.
    pub response_size: Option<u64>,
}

/// The frozen result of one completed run.
///
/// Field names are the wire contract for the JSON report; series share one
/// index per outcome, in arrival order.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Time to first byte per outcome, in seconds.
    pub ttfb: Vec<f64>,
    pub status: Vec<u16>,
    /// Elapsed seconds since run start per outcome.
    pub timestamp: Vec<f64>,
    /// Body sizes in bytes; omitted entirely under `--ttfb-only`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_size: Option<Vec<u64>>,
    /// Wall-clock seconds from first batch start to last batch completion.
    pub total_duration: f64,
    /// Completed responses per whole elapsed second.
    pub responses_per_second: BTreeMap<u64, u64>,
}
