//! Sequential volleys of concurrent requests, paced by a fixed delay.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, Request};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::{
    args::{PositiveU64, PositiveUsize, VolleyArgs},
    error::{AppError, AppResult, MetricsError},
    http::execute_request,
    metrics::{Sample, StatsSnapshot, setup_stats_collector},
};


/// Pacing knobs for one run, resolved from CLI and config.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    pub batch_size: PositiveUsize,
    pub batch_count: PositiveU64,
    pub inter_batch_delay: Duration,
    pub ttfb_only: bool,
}

impl BatchConfig {
    #[must_use]
    pub const fn from_args(args: &VolleyArgs) -> Self {
        Self {
            batch_size: args.batch_size,
            batch_count: args.batch_count,
            inter_batch_delay: args.delay,
            ttfb_only: args.ttfb_only,
        }
    }
}

/// Drives one run: fires volleys, feeds the collector, freezes the snapshot.
pub struct Engine {
    client: Client,
    template: Arc<Request>,
    config: BatchConfig,
}

impl Engine {
    #[must_use]
    pub fn new(client: Client, template: Request, config: BatchConfig) -> Self {
        Self {
            client,
            template: Arc::new(template),
            config,
        }
    }

    /// Fire every volley and return the frozen run snapshot.
    ///
    /// Volleys run strictly in sequence: every request of one volley is
    /// joined before the next volley starts. The inter-batch delay is
    /// measured from volley completion, so the realized period stretches
    /// with slow responses rather than snapping to a wall-clock grid.
    /// There is no delay after the final volley.
    ///
    /// # Errors
    ///
    /// Returns an error if any request fails in transport or a request
    /// task panics. Later volleys do not start and no snapshot is
    /// produced.
    pub async fn run(&self) -> AppResult<StatsSnapshot> {
        let batch_size = self.config.batch_size.get();
        let batch_count = self.config.batch_count.get();

        let (sample_tx, sample_rx) = mpsc::channel::<Sample>(batch_size);
        let collector = setup_stats_collector(sample_rx, !self.config.ttfb_only);

        info!(
            "Firing {} volleys of {} requests each.",
            batch_count, batch_size
        );
        let run_start = Instant::now();

        for volley in 1..=batch_count {
            let mut handles = Vec::with_capacity(batch_size);
            for _ in 0..batch_size {
                handles.push(self.spawn_request(&sample_tx, run_start));
            }
            join_volley(handles).await?;
            debug!("Volley {} of {} complete.", volley, batch_count);

            if volley < batch_count && !self.config.inter_batch_delay.is_zero() {
                sleep(self.config.inter_batch_delay).await;
            }
        }
        let total_duration = run_start.elapsed();

        drop(sample_tx);
        let accumulator = collector.await?;
        Ok(accumulator.freeze(total_duration))
    }

    fn spawn_request(
        &self,
        sample_tx: &mpsc::Sender<Sample>,
        run_start: Instant,
    ) -> tokio::task::JoinHandle<AppResult<()>> {
        let client = self.client.clone();
        let template = Arc::clone(&self.template);
        let sample_tx = sample_tx.clone();
        let ttfb_only = self.config.ttfb_only;
        tokio::spawn(async move {
            let sample = execute_request(&client, &template, run_start, ttfb_only).await?;
            if sample_tx.send(sample).await.is_err() {
                return Err(AppError::metrics(MetricsError::ChannelClosed));
            }
            Ok(())
        })
    }
}

async fn join_volley(handles: Vec<tokio::task::JoinHandle<AppResult<()>>>) -> AppResult<()> {
    let mut first_error: Option<AppError> = None;
    for handle in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                error!("Request failed: {}", err);
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
            Err(err) => {
                error!("Request task failed: {}", err);
                if first_error.is_none() {
                    first_error = Some(AppError::from(err));
                }
            }
        }
    }
    first_error.map_or(Ok(()), Err)
}
