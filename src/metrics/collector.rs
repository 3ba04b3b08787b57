use std::collections::BTreeMap;
use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

use super::types::{Sample, StatsSnapshot};

/// Accumulates samples in arrival order until the run ends.
///
/// Owned by the collector task while the run is live; the scheduler takes it
/// back when the sample channel closes and freezes it into a snapshot.
#[derive(Debug)]
pub struct StatsAccumulator {
    ttfb: Vec<f64>,
    status: Vec<u16>,
    timestamp: Vec<f64>,
    response_size: Option<Vec<u64>>,
    responses_per_second: BTreeMap<u64, u64>,
}

impl StatsAccumulator {
    #[must_use]
    pub fn new(collect_sizes: bool) -> Self {
        Self {
            ttfb: Vec::new(),
            status: Vec::new(),
            timestamp: Vec::new(),
            response_size: collect_sizes.then(Vec::new),
            responses_per_second: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, sample: &Sample) {
        self.ttfb.push(sample.ttfb.as_secs_f64());
        self.status.push(sample.status);
        self.timestamp.push(sample.elapsed.as_secs_f64());
        if let Some(sizes) = self.response_size.as_mut()
            && let Some(size) = sample.response_size
        {
            sizes.push(size);
        }

        let bucket = sample.elapsed.as_secs();
        let count = self.responses_per_second.entry(bucket).or_insert(0);
        *count = count.saturating_add(1);
    }

    #[must_use]
    pub fn freeze(self, total_duration: Duration) -> StatsSnapshot {
        StatsSnapshot {
            ttfb: self.ttfb,
            status: self.status,
            timestamp: self.timestamp,
            response_size: self.response_size,
            total_duration: total_duration.as_secs_f64(),
            responses_per_second: self.responses_per_second,
        }
    }
}

/// Spawns the single collector task that drains the sample channel.
///
/// The task finishes when every sender has been dropped and hands the
/// accumulated series back to the caller.
#[must_use]
pub fn setup_stats_collector(
    mut sample_rx: mpsc::Receiver<Sample>,
    collect_sizes: bool,
) -> JoinHandle<StatsAccumulator> {
    tokio::spawn(async move {
        let mut accumulator = StatsAccumulator::new(collect_sizes);
        while let Some(sample) = sample_rx.recv().await {
            accumulator.record(&sample);
        }
        accumulator
    })
}
